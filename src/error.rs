//! Error types for the generation pipeline.
//!
//! Errors are split by layer. Model errors abort a request before any file
//! is read; emission errors abort it before any file is merged. Everything
//! that can be resolved in place is reported as a
//! [`Diagnostic`](crate::diagnostics::Diagnostic) instead.

use smol_str::SmolStr;
use thiserror::Error;

use crate::model::{MemberKind, TargetLanguage};

/// Structural problems in a class description or its ancestor chain.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ModelError {
    /// An ancestor is generated in another language than the class.
    #[error(
        "{class} inherits from {ancestor}: it must be generated in {expected}, not {found}"
    )]
    LanguageMismatch {
        class: SmolStr,
        ancestor: SmolStr,
        expected: TargetLanguage,
        found: TargetLanguage,
    },

    /// A class declares the same (kind, name) twice.
    #[error("{class} declares {kind} '{name}' more than once")]
    DuplicateLocalMember {
        class: SmolStr,
        kind: MemberKind,
        name: SmolStr,
    },

    /// An editing operation would create a second local member of that name.
    #[error("{kind} '{name}' already exists")]
    DuplicateMember { kind: MemberKind, name: SmolStr },

    /// A state of that name is already declared.
    #[error("state '{name}' already exists")]
    DuplicateState { name: SmolStr },

    /// A server already contains a class of that name.
    #[error("{server} already contains class {class}")]
    DuplicateClass { server: SmolStr, class: SmolStr },

    /// An editing operation refers to a member that does not exist.
    #[error("no {kind} named '{name}'")]
    UnknownMember { kind: MemberKind, name: SmolStr },

    /// A class or member name breaks the identifier rules.
    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Attaching the ancestor would make the chain loop back on itself.
    #[error("{class} cannot inherit from {ancestor}: inheritance cycle")]
    InheritanceCycle { class: SmolStr, ancestor: SmolStr },
}

impl ModelError {
    /// Create an invalid name error.
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a duplicate member error.
    pub fn duplicate(kind: MemberKind, name: impl Into<SmolStr>) -> Self {
        Self::DuplicateMember {
            kind,
            name: name.into(),
        }
    }

    /// Create an unknown member error.
    pub fn unknown(kind: MemberKind, name: impl Into<SmolStr>) -> Self {
        Self::UnknownMember {
            kind,
            name: name.into(),
        }
    }
}

/// A member's shape cannot be expressed in the chosen target language.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error("{language}: {subject} is not supported: {reason}")]
    UnsupportedConstruct {
        language: TargetLanguage,
        subject: String,
        reason: String,
    },
}

impl CodegenError {
    /// Create an unsupported construct error.
    pub fn unsupported(
        language: TargetLanguage,
        subject: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnsupportedConstruct {
            language,
            subject: subject.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that abort a whole generation request.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Structural problem in the class or its ancestors.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A member could not be emitted in the target language.
    #[error(transparent)]
    Codegen(#[from] CodegenError),

    /// The prior version of a file exists but could not be read.
    #[error("cannot read prior version of {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the legacy converter that stop a conversion outright.
///
/// Everything short of these degrades to warnings.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LegacyError {
    /// `upgrade` was called on a record that already uses the current schema.
    #[error("record uses the current schema revision {0}")]
    NotLegacy(String),

    /// The record has no usable class name.
    #[error("legacy record has no class name")]
    MissingClassName,
}

/// Errors while loading a [`GeneratorConfig`](crate::config::GeneratorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("YAML error: {0}")]
    Yaml(String),

    #[error("unknown config format: {0}")]
    UnknownFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_mismatch_message_names_both_classes() {
        let err = ModelError::LanguageMismatch {
            class: "Child".into(),
            ancestor: "Parent".into(),
            expected: TargetLanguage::NativeCompiled,
            found: TargetLanguage::ManagedVm,
        };
        let msg = err.to_string();
        assert!(msg.contains("Child"));
        assert!(msg.contains("Parent"));
        assert!(msg.contains("Cpp"));
        assert!(msg.contains("Java"));
    }

    #[test]
    fn generate_error_wraps_model_error() {
        let err: GenerateError = ModelError::unknown(MemberKind::Attribute, "X").into();
        assert!(matches!(err, GenerateError::Model(ModelError::UnknownMember { .. })));
        assert_eq!(err.to_string(), "no attribute named 'X'");
    }
}
