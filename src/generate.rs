//! The generation pipeline: resolve, emit, merge.
//!
//! ```text
//! ClassDescription ──resolve──▶ EffectiveInterface ──emit──▶ skeletons
//!                                                              │
//!                     PriorSource (previous files) ──merge─────┘──▶ GenerationOutput
//! ```
//!
//! Every file of a request is merged into memory before anything is
//! returned. A model or emission error aborts the request before a single
//! prior file is read, and the core never writes files itself.

use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::codegen::{CodeEmitter, SourceSkeleton, ZoneId, emit_server};
use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostic, WarningKind};
use crate::error::GenerateError;
use crate::legacy::RecoveredFragments;
use crate::merge::{RenameTracker, merge, parse_zones};
use crate::model::{ClassDescription, ServerDescription};
use crate::resolve::resolve;

// ============================================================================
// PRIOR FILES
// ============================================================================

/// Where the previous version of each generated file comes from.
pub trait PriorSource {
    /// Text of the previous version of `file_name`, or `None` on a first
    /// generation.
    fn read_prior(&self, file_name: &str) -> Result<Option<String>, GenerateError>;
}

/// Reads prior files from `<root>/<file name>`. A missing file is a first
/// generation, any other read failure is an error.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PriorSource for DirectorySource {
    fn read_prior(&self, file_name: &str) -> Result<Option<String>, GenerateError> {
        let path = self.root.join(file_name);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(GenerateError::Io {
                file: path.display().to_string(),
                source,
            }),
        }
    }
}

/// Prior files held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: IndexMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, file_name: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(file_name.into(), text.into());
        self
    }

    pub fn insert(&mut self, file_name: impl Into<String>, text: impl Into<String>) {
        self.files.insert(file_name.into(), text.into());
    }
}

impl PriorSource for MemorySource {
    fn read_prior(&self, file_name: &str) -> Result<Option<String>, GenerateError> {
        Ok(self.files.get(file_name).cloned())
    }
}

impl From<&GenerationOutput> for MemorySource {
    fn from(output: &GenerationOutput) -> Self {
        Self {
            files: output.files.clone(),
        }
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// Final file texts of one request, keyed by file name in emission order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationOutput {
    pub files: IndexMap<String, String>,
    pub warnings: Vec<Diagnostic>,
}

impl GenerationOutput {
    pub fn file(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

// ============================================================================
// GENERATOR
// ============================================================================

/// Runs generation requests with one configuration.
#[derive(Clone, Debug, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Resolve and emit without merging.
    pub fn skeletons(
        &self,
        class: &ClassDescription,
    ) -> Result<(Vec<SourceSkeleton>, Vec<Diagnostic>), GenerateError> {
        let iface = resolve(class)?;
        let emitter = CodeEmitter::for_language(class.language);
        let skeletons = emitter.emit(&iface, class, &self.config)?;
        Ok((skeletons, iface.warnings))
    }

    /// Generate every file of `class`, merging the prior versions.
    ///
    /// On success the tracker's pending renames and deletions have been
    /// applied and it is cleared. On error it is left untouched.
    pub fn generate(
        &self,
        class: &ClassDescription,
        prior: &dyn PriorSource,
        renames: &mut RenameTracker,
    ) -> Result<GenerationOutput, GenerateError> {
        self.run(class, prior, renames, None)
    }

    /// Like [`generate`](Self::generate), also reinserting bodies recovered
    /// from a legacy upgrade into zones the prior files do not provide.
    pub fn generate_with_fragments(
        &self,
        class: &ClassDescription,
        fragments: &RecoveredFragments,
        prior: &dyn PriorSource,
        renames: &mut RenameTracker,
    ) -> Result<GenerationOutput, GenerateError> {
        self.run(class, prior, renames, Some(fragments))
    }

    /// Generate the entry-point files of a multi-class server.
    pub fn generate_server(
        &self,
        server: &ServerDescription,
        prior: &dyn PriorSource,
    ) -> Result<GenerationOutput, GenerateError> {
        let skeletons = emit_server(server, &self.config)?;
        let mut output = GenerationOutput::default();
        merge_all(&skeletons, prior, &RenameTracker::new(), None, &mut output)?;
        tracing::debug!("generated server {} ({} files)", server.name, output.files.len());
        Ok(output)
    }

    fn run(
        &self,
        class: &ClassDescription,
        prior: &dyn PriorSource,
        renames: &mut RenameTracker,
        fragments: Option<&RecoveredFragments>,
    ) -> Result<GenerationOutput, GenerateError> {
        let (skeletons, resolve_warnings) = self.skeletons(class)?;
        tracing::debug!("{}: {} skeleton(s) emitted", class.name, skeletons.len());

        let mut output = GenerationOutput {
            files: IndexMap::new(),
            warnings: resolve_warnings,
        };
        merge_all(&skeletons, prior, renames, fragments, &mut output)?;

        if let Some(fragments) = fragments {
            let slots: FxHashSet<&ZoneId> = skeletons.iter().flat_map(|s| s.zone_ids()).collect();
            for (id, _) in fragments.iter().filter(|(id, _)| !slots.contains(id)) {
                output.warnings.push(Diagnostic::new(
                    WarningKind::LegacyConversionIncomplete,
                    format!("recovered body for '{id}' has no slot in the generated files"),
                ));
            }
        }

        renames.clear();
        tracing::debug!(
            "{}: generated {} file(s), {} warning(s)",
            class.name,
            output.files.len(),
            output.warnings.len()
        );
        Ok(output)
    }
}

/// Read every prior file, then merge. Nothing is added to `output` when a
/// read fails.
fn merge_all(
    skeletons: &[SourceSkeleton],
    prior: &dyn PriorSource,
    renames: &RenameTracker,
    fragments: Option<&RecoveredFragments>,
    output: &mut GenerationOutput,
) -> Result<(), GenerateError> {
    let mut priors = Vec::with_capacity(skeletons.len());
    for skeleton in skeletons {
        let text = prior.read_prior(&skeleton.file_name)?;
        let text = match fragments {
            Some(fragments) => with_fragments(skeleton, text, fragments),
            None => text,
        };
        priors.push(text);
    }

    for (skeleton, text) in skeletons.iter().zip(priors) {
        let result = merge(skeleton, text.as_deref(), renames);
        output.warnings.extend(result.warnings);
        output.files.insert(result.file_name, result.text);
    }
    Ok(())
}

/// Append recovered bodies for the skeleton's zones that the prior text
/// does not already hold.
fn with_fragments(
    skeleton: &SourceSkeleton,
    prior: Option<String>,
    fragments: &RecoveredFragments,
) -> Option<String> {
    let slots: FxHashSet<&ZoneId> = skeleton.zone_ids().collect();
    let present = prior
        .as_deref()
        .map(|text| parse_zones(text, skeleton.style).zones)
        .unwrap_or_default();
    let extra = fragments.prior_text_where(skeleton.style, |id| {
        slots.contains(id) && !present.contains_key(id)
    });
    if extra.is_empty() {
        return prior;
    }
    let mut text = prior.unwrap_or_default();
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text.push_str(&extra);
    Some(text)
}
