//! Diagnostics: non-fatal conditions reported alongside results.
//!
//! Resolution, merging and legacy conversion never fail on recoverable
//! conditions. They resolve them in place (default text, drop, pass-through)
//! and record a [`Diagnostic`] so the caller can show it to a human.

use std::fmt;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// What kind of degradation a warning reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// An ancestor member is hidden by a local member marked as override.
    HiddenByOverride,
    /// A local member redeclares an inherited name without the override marker.
    ImplicitOverride,
    /// A state constraint refers to a member or state that no longer exists.
    StaleStateConstraint,
    /// Zone markers in a prior file could not be parsed unambiguously.
    MalformedProtectedRegion,
    /// A zone was dropped because its member was deleted.
    DroppedZone,
    /// A zone from the prior file has no counterpart in the new skeleton.
    OrphanedZone,
    /// A renamed zone collided with a zone already present under the new id.
    RenameCollision,
    /// Part of a legacy description could not be mapped.
    LegacyConversionIncomplete,
}

impl WarningKind {
    /// Stable warning code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::HiddenByOverride => codes::HIDDEN_BY_OVERRIDE,
            Self::ImplicitOverride => codes::IMPLICIT_OVERRIDE,
            Self::StaleStateConstraint => codes::STALE_STATE_CONSTRAINT,
            Self::MalformedProtectedRegion => codes::MALFORMED_PROTECTED_REGION,
            Self::DroppedZone => codes::DROPPED_ZONE,
            Self::OrphanedZone => codes::ORPHANED_ZONE,
            Self::RenameCollision => codes::RENAME_COLLISION,
            Self::LegacyConversionIncomplete => codes::LEGACY_CONVERSION_INCOMPLETE,
        }
    }
}

/// A warning with an optional file it applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: WarningKind,
    pub message: String,
    /// The generated file this warning concerns, if any.
    pub file: Option<String>,
}

impl Diagnostic {
    /// Create a new warning.
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file: None,
        }
    }

    /// Attach the file this warning concerns.
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Stable warning code.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{} [{}]: {}", self.code(), file, self.message),
            None => write!(f, "{}: {}", self.code(), self.message),
        }
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Stable warning codes.
///
/// - **W0001-W0019**: inheritance resolution
/// - **W0020-W0039**: protected-region merging
/// - **W0040-W0059**: legacy conversion
pub mod codes {
    pub const HIDDEN_BY_OVERRIDE: &str = "W0001";
    pub const IMPLICIT_OVERRIDE: &str = "W0002";
    pub const STALE_STATE_CONSTRAINT: &str = "W0003";

    pub const MALFORMED_PROTECTED_REGION: &str = "W0020";
    pub const DROPPED_ZONE: &str = "W0021";
    pub const ORPHANED_ZONE: &str = "W0022";
    pub const RENAME_COLLISION: &str = "W0023";

    pub const LEGACY_CONVERSION_INCOMPLETE: &str = "W0040";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during one pipeline stage.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic, mirroring it to the log.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Add a warning built from a kind and message.
    pub fn warn(&mut self, kind: WarningKind, message: impl Into<String>) {
        self.add(Diagnostic::new(kind, message));
    }

    /// Whether nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of collected diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Consume the collector.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
