//! Protected-zone identity and marker lines.
//!
//! A zone id names one developer-owned slot in a generated file. It is built
//! from names and roles only, never from positions, so adding or removing an
//! unrelated member does not change it:
//!
//! ```text
//! class:init-device
//! attribute:Temperature:read-implementation
//! server:additional-classes
//! ```

use std::fmt;

use smol_str::{SmolStr, format_smolstr};

use crate::model::{MemberKind, TargetLanguage};

// ============================================================================
// ROLES
// ============================================================================

/// Class-level slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassRole {
    Includes,
    Members,
    InitDevice,
    DeleteDevice,
    AlwaysExecutedHook,
    AdditionalMethods,
}

impl ClassRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Includes => "includes",
            Self::Members => "members",
            Self::InitDevice => "init-device",
            Self::DeleteDevice => "delete-device",
            Self::AlwaysExecutedHook => "always-executed-hook",
            Self::AdditionalMethods => "additional-methods",
        }
    }
}

/// Per-member slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberRole {
    Read,
    Write,
    Execute,
    IsAllowed,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read-implementation",
            Self::Write => "write-implementation",
            Self::Execute => "execute-implementation",
            Self::IsAllowed => "is-allowed",
        }
    }
}

/// Slots of a multi-class server's main files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServerRole {
    Includes,
    AdditionalClasses,
}

impl ServerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Includes => "includes",
            Self::AdditionalClasses => "additional-classes",
        }
    }
}

// ============================================================================
// ZONE ID
// ============================================================================

/// Stable key of a protected zone.
///
/// Comparison is exact and case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(SmolStr);

impl ZoneId {
    pub fn class(role: ClassRole) -> Self {
        Self(format_smolstr!("class:{}", role.as_str()))
    }

    pub fn member(kind: MemberKind, name: &str, role: MemberRole) -> Self {
        Self(format_smolstr!("{}:{}:{}", kind.id_tag(), name, role.as_str()))
    }

    pub fn server(role: ServerRole) -> Self {
        Self(format_smolstr!("server:{}", role.as_str()))
    }

    /// Wrap an id read back from text. Any non-empty string is accepted;
    /// ids from other tool versions must survive a merge untouched.
    pub fn from_raw(raw: impl Into<SmolStr>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split a member-level id into kind, member name and role.
    pub fn member_parts(&self) -> Option<(MemberKind, &str, &str)> {
        let mut parts = self.0.splitn(3, ':');
        let kind = MemberKind::from_id_tag(parts.next()?)?;
        let name = parts.next()?;
        let role = parts.next()?;
        if name.is_empty() || role.is_empty() {
            return None;
        }
        Some((kind, name, role))
    }

    /// The same slot for a member now called `name`.
    ///
    /// Returns `None` for ids that are not member-level.
    pub fn with_member_name(&self, name: &str) -> Option<Self> {
        let (kind, _, role) = self.member_parts()?;
        Some(Self(format_smolstr!("{}:{}:{}", kind.id_tag(), name, role)))
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// MARKERS
// ============================================================================

const BEGIN_OPEN: &str = "----- PROTECTED REGION ID(";
const BEGIN_CLOSE: &str = ") ENABLED START -----";
const END_OPEN: &str = "----- PROTECTED REGION END(";
const END_CLOSE: &str = ") -----";

/// Comment syntax used to wrap marker lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerStyle {
    /// `/*----- ... -----*/`
    Block,
    /// `#----- ... -----#`
    Hash,
}

/// A recognized marker line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker<'a> {
    Begin(&'a str),
    End(&'a str),
}

impl MarkerStyle {
    pub fn for_language(language: TargetLanguage) -> Self {
        if language.is_c_family() {
            Self::Block
        } else {
            Self::Hash
        }
    }

    fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            Self::Block => ("/*", "*/"),
            Self::Hash => ("#", "#"),
        }
    }

    /// Begin marker for `id`, without indentation or newline.
    pub fn begin(&self, id: &ZoneId) -> String {
        let (open, close) = self.delimiters();
        format!("{open}{BEGIN_OPEN}{id}{BEGIN_CLOSE}{close}")
    }

    /// End marker for `id`, without indentation or newline.
    pub fn end(&self, id: &ZoneId) -> String {
        let (open, close) = self.delimiters();
        format!("{open}{END_OPEN}{id}{END_CLOSE}{close}")
    }

    /// Recognize a marker line. Surrounding whitespace is indentation.
    pub fn parse_line<'a>(&self, line: &'a str) -> Option<Marker<'a>> {
        let (open, close) = self.delimiters();
        let body = line.trim().strip_prefix(open)?.strip_suffix(close)?;
        if let Some(id) = body
            .strip_prefix(BEGIN_OPEN)
            .and_then(|rest| rest.strip_suffix(BEGIN_CLOSE))
        {
            return (!id.is_empty()).then_some(Marker::Begin(id));
        }
        body.strip_prefix(END_OPEN)
            .and_then(|rest| rest.strip_suffix(END_CLOSE))
            .filter(|id| !id.is_empty())
            .map(Marker::End)
    }
}
