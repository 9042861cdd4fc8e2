//! Data-type spelling per target language.

use crate::model::DataType;

// ── C++ ─────────────────────────────────────────────────────────────

/// Tango C++ type for a value of `data_type`.
pub(crate) fn cpp_type(data_type: DataType) -> String {
    match data_type {
        DataType::Void => "void".to_string(),
        other => format!("Tango::{}", other.label()),
    }
}

/// C++ parameter list for a command input.
pub(crate) fn cpp_argin(data_type: DataType) -> String {
    match data_type {
        DataType::Void => String::new(),
        t if t.is_array() => format!("const {} *argin", cpp_type(t)),
        t => format!("{} argin", cpp_type(t)),
    }
}

/// C++ return type of a command.
pub(crate) fn cpp_argout(data_type: DataType) -> String {
    match data_type {
        t if t.is_array() => format!("{} *", cpp_type(t)),
        t => cpp_type(t),
    }
}

// ── Java ────────────────────────────────────────────────────────────

pub(crate) fn java_type(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Boolean => "boolean",
        DataType::Short | DataType::UShort | DataType::Enum => "short",
        DataType::Long | DataType::ULong => "int",
        DataType::Long64 | DataType::ULong64 => "long",
        DataType::Float => "float",
        DataType::Double => "double",
        DataType::String => "String",
        DataType::UChar => "byte",
        DataType::State => "DevState",
        DataType::Encoded => "DevEncoded",
        DataType::Void => "void",
        DataType::VarShortArray => "short[]",
        DataType::VarLongArray => "int[]",
        DataType::VarDoubleArray => "double[]",
        DataType::VarStringArray => "String[]",
        DataType::VarBooleanArray => "boolean[]",
        DataType::VarCharArray => "byte[]",
    }
}

/// Java type of an attribute value, arrays for spectrum/image.
pub(crate) fn java_attr_type(data_type: DataType, dimensions: usize) -> String {
    format!("{}{}", java_type(data_type), "[]".repeat(dimensions))
}

/// Placeholder value returned by a generated Java read stub.
pub(crate) fn java_default(data_type: DataType, dimensions: usize) -> String {
    if dimensions > 0 {
        return format!("new {}{}", java_type(data_type), "[0]".repeat(dimensions));
    }
    match data_type {
        DataType::Boolean => "false".into(),
        DataType::Float => "0.0f".into(),
        DataType::Double => "0.0".into(),
        DataType::String => "\"\"".into(),
        DataType::State => "DevState.UNKNOWN".into(),
        DataType::Encoded => "new DevEncoded()".into(),
        DataType::Short | DataType::UShort | DataType::Enum => "(short) 0".into(),
        DataType::UChar => "(byte) 0".into(),
        DataType::Long64 | DataType::ULong64 => "0L".into(),
        t if t.is_array() => format!("new {}", java_type(t).replacen("[]", "[0]", 1)),
        _ => "0".into(),
    }
}

// ── Python ──────────────────────────────────────────────────────────

/// Placeholder value used by generated Python read stubs.
pub(crate) fn python_default(data_type: DataType, dimensions: usize) -> &'static str {
    if dimensions > 0 || data_type.is_array() {
        return "[]";
    }
    match data_type {
        DataType::Boolean => "False",
        DataType::Float | DataType::Double => "0.0",
        DataType::String => "''",
        DataType::State => "DevState.UNKNOWN",
        DataType::Encoded => "('', b'')",
        DataType::Void => "None",
        _ => "0",
    }
}
