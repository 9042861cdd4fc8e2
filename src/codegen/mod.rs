//! Code emission: effective interface in, source skeletons out.
//!
//! ## Design
//!
//! Each target language is one variant of [`CodeEmitter`]. An emitter is a
//! pure function from a resolved class to a set of [`SourceSkeleton`]s:
//! generated text interleaved with named protected zones holding default
//! bodies. Nothing here reads or writes files; merging prior hand-written
//! text into the zones is the job of [`crate::merge`].
//!
//! ```text
//! EffectiveInterface ──validate──▶ CodeEmitter::emit ──▶ Vec<SourceSkeleton>
//!                                       │
//!                 ┌──────────┬──────────┼──────────────┐
//!                cpp        java      python       python_hl
//! ```
//!
//! Only locally declared members (overrides included) get implementation
//! zones. Inherited members show up in the generated documentation only.

mod common;
mod cpp;
mod java;
mod python;
mod python_hl;
mod server;
mod skeleton;
mod types;
mod validate;
mod writer;
mod zone;

pub use server::emit_server;
pub use skeleton::{Segment, SourceSkeleton};
pub use zone::{ClassRole, Marker, MarkerStyle, MemberRole, ServerRole, ZoneId};

use common::EmitContext;

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::model::{ClassDescription, TargetLanguage};
use crate::resolve::EffectiveInterface;

/// One emitter per target language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodeEmitter {
    Cpp,
    Java,
    Python,
    PythonHl,
}

impl CodeEmitter {
    pub fn for_language(language: TargetLanguage) -> Self {
        match language {
            TargetLanguage::NativeCompiled => Self::Cpp,
            TargetLanguage::ManagedVm => Self::Java,
            TargetLanguage::ScriptedStandard => Self::Python,
            TargetLanguage::ScriptedHighLevel => Self::PythonHl,
        }
    }

    pub fn language(&self) -> TargetLanguage {
        match self {
            Self::Cpp => TargetLanguage::NativeCompiled,
            Self::Java => TargetLanguage::ManagedVm,
            Self::Python => TargetLanguage::ScriptedStandard,
            Self::PythonHl => TargetLanguage::ScriptedHighLevel,
        }
    }

    /// Produce the skeletons of every file of the class.
    ///
    /// Fails without producing anything when a member cannot be expressed
    /// in this language.
    pub fn emit(
        &self,
        iface: &EffectiveInterface,
        class: &ClassDescription,
        config: &GeneratorConfig,
    ) -> Result<Vec<SourceSkeleton>, CodegenError> {
        let language = self.language();
        validate::check_interface(iface, language)?;

        let ctx = EmitContext::new(iface, class, config, MarkerStyle::for_language(language));
        let skeletons = match self {
            Self::Cpp => cpp::emit(&ctx),
            Self::Java => java::emit(&ctx),
            Self::Python => python::emit(&ctx),
            Self::PythonHl => python_hl::emit(&ctx),
        };
        tracing::debug!(
            "{:?} emitted {} skeleton(s) for {}",
            self,
            skeletons.len(),
            iface.class_name
        );
        Ok(skeletons)
    }
}
