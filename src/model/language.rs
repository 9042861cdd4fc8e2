//! Target languages and class-level enumerations.

use std::fmt;

/// The closed set of languages a device class can be generated in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetLanguage {
    /// Statically typed, compiled target (C++).
    #[default]
    NativeCompiled,
    /// Managed virtual-machine target (Java).
    ManagedVm,
    /// Classic scripted target (Python).
    ScriptedStandard,
    /// High-level scripted target (Python high-level API).
    ScriptedHighLevel,
}

impl TargetLanguage {
    /// All languages, in menu order.
    pub const ALL: [TargetLanguage; 4] = [
        Self::NativeCompiled,
        Self::ManagedVm,
        Self::ScriptedStandard,
        Self::ScriptedHighLevel,
    ];

    /// Label stored in class descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NativeCompiled => "Cpp",
            Self::ManagedVm => "Java",
            Self::ScriptedStandard => "Python",
            Self::ScriptedHighLevel => "PythonHL",
        }
    }

    /// Parse a language label (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(name))
    }

    /// Whether generated files use `/* */` comments (vs `#`).
    pub fn is_c_family(&self) -> bool {
        matches!(self, Self::NativeCompiled | Self::ManagedVm)
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// License written in generated file headers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum License {
    #[default]
    Gpl,
    Lgpl,
    Apache,
    Mit,
    None,
}

impl License {
    /// Label stored in class descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gpl => "GPL",
            Self::Lgpl => "LGPL",
            Self::Apache => "APACHE",
            Self::Mit => "MIT",
            Self::None => "none",
        }
    }

    /// Parse a license label (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Gpl, Self::Lgpl, Self::Apache, Self::Mit, Self::None]
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
