//! # devgen-base
//!
//! Core library of a device-class code generator: class model, inheritance
//! resolution, four-language code emission and protected-region merging.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! session   → EditSession (edits that feed the RenameTracker)
//!   ↓
//! generate  → Generator pipeline (resolve → emit → merge), PriorSource
//!   ↓
//! merge     → zone parser, RenameTracker, merge()
//! legacy    → legacy record detection/upgrade, fragment recovery
//!   ↓
//! codegen   → SourceSkeleton, ZoneId, MarkerStyle, CodeEmitter, server emitter
//!   ↓
//! resolve   → resolve(), EffectiveInterface
//!   ↓
//! model     → ClassDescription, members, StateMachine, ServerDescription
//!   ↓
//! base      → identifier rules, comment/text helpers
//! ```
//!
//! `config`, `diagnostics` and `error` are shared by every layer.
//!
//! ## Example
//!
//! ```text
//! let mut class = ClassDescription::new("Motor", TargetLanguage::NativeCompiled)?;
//! class.add_attribute(Attribute::new("Position", DataType::Double))?;
//! let out = Generator::new(&config).generate(&class, &DirectorySource::new(dir), &mut tracker)?;
//! for (file, text) in &out.files { /* persist */ }
//! ```

// ============================================================================
// MODULES (dependency order: base → model → resolve → codegen → merge → generate)
// ============================================================================

/// Foundation: identifier rules and text helpers
pub mod base;

/// Generator settings
pub mod config;

/// Non-fatal warnings and their codes
pub mod diagnostics;

/// Error types, one per layer
pub mod error;

/// Class model: ClassDescription, members, state machine
pub mod model;

/// Inheritance resolution
pub mod resolve;

/// Code emission for the four target languages
pub mod codegen;

/// Protected-region merging and rename tracking
pub mod merge;

/// Legacy description upgrade
pub mod legacy;

/// Generation pipeline
pub mod generate;

/// Editing session
pub mod session;

// Re-export the types most callers need
pub use codegen::{CodeEmitter, SourceSkeleton, ZoneId};
pub use config::GeneratorConfig;
pub use diagnostics::{Diagnostic, WarningKind};
pub use error::{CodegenError, ConfigError, GenerateError, LegacyError, ModelError};
pub use generate::{DirectorySource, GenerationOutput, Generator, MemorySource, PriorSource};
pub use merge::{MergeResult, RenameTracker};
pub use model::{ClassDescription, TargetLanguage};
pub use resolve::{EffectiveInterface, resolve};
pub use session::EditSession;
