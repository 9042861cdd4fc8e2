//! Member types of a device class: attributes, commands, properties, pipes.

use std::fmt;

use smol_str::SmolStr;

// ============================================================================
// MEMBER KINDS
// ============================================================================

/// The kind of a class member. Names are unique per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberKind {
    Attribute,
    Command,
    ClassProperty,
    DeviceProperty,
    Pipe,
}

impl MemberKind {
    /// All kinds, in the order they appear in generated code.
    pub const ALL: [MemberKind; 5] = [
        Self::ClassProperty,
        Self::DeviceProperty,
        Self::Command,
        Self::Attribute,
        Self::Pipe,
    ];

    /// Tag used inside protected-zone ids (`attribute:Temp:read-implementation`).
    pub fn id_tag(&self) -> &'static str {
        match self {
            Self::Attribute => "attribute",
            Self::Command => "command",
            Self::ClassProperty => "class-property",
            Self::DeviceProperty => "device-property",
            Self::Pipe => "pipe",
        }
    }

    /// Parse a zone-id tag back into a kind.
    pub fn from_id_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id_tag() == tag)
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Attribute => "attribute",
            Self::Command => "command",
            Self::ClassProperty => "class property",
            Self::DeviceProperty => "device property",
            Self::Pipe => "pipe",
        })
    }
}

/// Common view over every member type.
pub trait Member: Clone + fmt::Debug {
    fn name(&self) -> &SmolStr;
    fn set_name(&mut self, name: SmolStr);
    /// Whether the member is explicitly marked as overriding an inherited one.
    fn is_override(&self) -> bool;
}

macro_rules! impl_member {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Member for $ty {
                fn name(&self) -> &SmolStr {
                    &self.name
                }

                fn set_name(&mut self, name: SmolStr) {
                    self.name = name;
                }

                fn is_override(&self) -> bool {
                    self.is_override
                }
            }
        )*
    };
}

impl_member!(Attribute, Command, Property, Pipe);

// ============================================================================
// DATA TYPES
// ============================================================================

/// Data types of attributes, command arguments and properties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Short,
    UShort,
    Long,
    ULong,
    Long64,
    ULong64,
    Float,
    #[default]
    Double,
    String,
    UChar,
    State,
    Enum,
    Encoded,
    Void,
    VarShortArray,
    VarLongArray,
    VarDoubleArray,
    VarStringArray,
    VarBooleanArray,
    VarCharArray,
}

impl DataType {
    const ALL: [DataType; 21] = [
        Self::Boolean,
        Self::Short,
        Self::UShort,
        Self::Long,
        Self::ULong,
        Self::Long64,
        Self::ULong64,
        Self::Float,
        Self::Double,
        Self::String,
        Self::UChar,
        Self::State,
        Self::Enum,
        Self::Encoded,
        Self::Void,
        Self::VarShortArray,
        Self::VarLongArray,
        Self::VarDoubleArray,
        Self::VarStringArray,
        Self::VarBooleanArray,
        Self::VarCharArray,
    ];

    /// Tango type label (`DevDouble`, `DevVarLongArray`, ...).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Boolean => "DevBoolean",
            Self::Short => "DevShort",
            Self::UShort => "DevUShort",
            Self::Long => "DevLong",
            Self::ULong => "DevULong",
            Self::Long64 => "DevLong64",
            Self::ULong64 => "DevULong64",
            Self::Float => "DevFloat",
            Self::Double => "DevDouble",
            Self::String => "DevString",
            Self::UChar => "DevUChar",
            Self::State => "DevState",
            Self::Enum => "DevEnum",
            Self::Encoded => "DevEncoded",
            Self::Void => "DevVoid",
            Self::VarShortArray => "DevVarShortArray",
            Self::VarLongArray => "DevVarLongArray",
            Self::VarDoubleArray => "DevVarDoubleArray",
            Self::VarStringArray => "DevVarStringArray",
            Self::VarBooleanArray => "DevVarBooleanArray",
            Self::VarCharArray => "DevVarCharArray",
        }
    }

    /// Parse a type label. Accepts `DevDouble`, `Double` and `double`.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        let bare = label.strip_prefix("Dev").unwrap_or(label);
        Self::ALL.into_iter().find(|t| {
            let own = &t.label()[3..];
            own.eq_ignore_ascii_case(bare)
        })
    }

    /// Array (sequence) argument types.
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            Self::VarShortArray
                | Self::VarLongArray
                | Self::VarDoubleArray
                | Self::VarStringArray
                | Self::VarBooleanArray
                | Self::VarCharArray
        )
    }

    /// Types an attribute may carry.
    pub fn is_attribute_type(&self) -> bool {
        !self.is_array() && *self != Self::Void
    }

    /// Types a property may carry.
    pub fn is_property_type(&self) -> bool {
        !matches!(self, Self::State | Self::Enum | Self::Encoded | Self::Void | Self::VarCharArray)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

/// Dimensionality of an attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AttrFormat {
    #[default]
    Scalar,
    Spectrum,
    Image,
}

impl AttrFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Spectrum => "SPECTRUM",
            Self::Image => "IMAGE",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Scalar, Self::Spectrum, Self::Image]
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

/// Read/write access of an attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AttrWriteType {
    #[default]
    Read,
    Write,
    ReadWrite,
    ReadWithWrite,
}

impl AttrWriteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::ReadWrite => "READ_WRITE",
            Self::ReadWithWrite => "READ_WITH_WRITE",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Read, Self::Write, Self::ReadWrite, Self::ReadWithWrite]
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Whether a read implementation is generated.
    pub fn is_readable(&self) -> bool {
        !matches!(self, Self::Write)
    }

    /// Whether a write implementation is generated.
    pub fn is_writable(&self) -> bool {
        matches!(self, Self::Write | Self::ReadWrite)
    }
}

/// A device attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attribute {
    pub name: SmolStr,
    pub data_type: DataType,
    pub format: AttrFormat,
    pub write_type: AttrWriteType,
    pub max_x: u32,
    pub max_y: u32,
    pub description: String,
    /// Labels of an Enum attribute.
    pub enum_labels: Vec<SmolStr>,
    pub memorized: bool,
    pub polling_period: Option<u32>,
    pub is_override: bool,
}

impl Attribute {
    /// A read-only scalar attribute.
    pub fn new(name: impl Into<SmolStr>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            max_x: 1,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: AttrFormat, max_x: u32, max_y: u32) -> Self {
        self.format = format;
        self.max_x = max_x;
        self.max_y = max_y;
        self
    }

    pub fn with_write_type(mut self, write_type: AttrWriteType) -> Self {
        self.write_type = write_type;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_enum_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.enum_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_polling_period(mut self, period_ms: u32) -> Self {
        self.polling_period = Some(period_ms);
        self
    }

    pub fn memorized(mut self) -> Self {
        self.memorized = true;
        self
    }

    /// Mark as overriding an inherited attribute of the same name.
    pub fn as_override(mut self) -> Self {
        self.is_override = true;
        self
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Input or output of a command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Argument {
    pub data_type: DataType,
    pub description: String,
}

impl Argument {
    pub fn new(data_type: DataType, description: impl Into<String>) -> Self {
        Self {
            data_type,
            description: description.into(),
        }
    }

    pub fn void() -> Self {
        Self::new(DataType::Void, "none")
    }
}

/// A device command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub name: SmolStr,
    pub argin: Argument,
    pub argout: Argument,
    pub description: String,
    pub polling_period: Option<u32>,
    pub is_override: bool,
}

impl Command {
    /// A command taking and returning nothing.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            argin: Argument::void(),
            argout: Argument::void(),
            description: String::new(),
            polling_period: None,
            is_override: false,
        }
    }

    pub fn with_argin(mut self, data_type: DataType, description: impl Into<String>) -> Self {
        self.argin = Argument::new(data_type, description);
        self
    }

    pub fn with_argout(mut self, data_type: DataType, description: impl Into<String>) -> Self {
        self.argout = Argument::new(data_type, description);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn as_override(mut self) -> Self {
        self.is_override = true;
        self
    }
}

// ============================================================================
// PROPERTIES AND PIPES
// ============================================================================

/// A class-level or device-level property.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Property {
    pub name: SmolStr,
    pub data_type: DataType,
    pub description: String,
    pub default_values: Vec<String>,
    pub mandatory: bool,
    pub is_override: bool,
}

impl Property {
    pub fn new(name: impl Into<SmolStr>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_default<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn as_override(mut self) -> Self {
        self.is_override = true;
        self
    }
}

/// Access of a pipe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PipeWriteType {
    #[default]
    Read,
    ReadWrite,
}

/// A device pipe.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pipe {
    pub name: SmolStr,
    pub description: String,
    pub write_type: PipeWriteType,
    pub is_override: bool,
}

impl Pipe {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn writable(mut self) -> Self {
        self.write_type = PipeWriteType::ReadWrite;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn as_override(mut self) -> Self {
        self.is_override = true;
        self
    }
}
