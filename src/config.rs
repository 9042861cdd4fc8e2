//! Generator settings.
//!
//! A plain struct with defaults and `with_*` builders. With the `serde`
//! feature it can also be read from a `.json` or `.yaml` file:
//!
//! ```text
//! indent_width: 2
//! default_copyright: "Synchrotron Lab"
//! emit_banner: true
//! recover_legacy_code: false
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use crate::error::ConfigError;

/// Settings shared by every emitter and the legacy converter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Spaces per indentation level.
    pub indent_width: usize,

    /// Copyright line used when a class carries none.
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub default_copyright: Option<String>,

    /// Whether files start with a title/license banner.
    pub emit_banner: bool,

    /// Whether legacy upgrades extract hand-written method bodies.
    pub recover_legacy_code: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            default_copyright: None,
            emit_banner: true,
            recover_legacy_code: true,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_default_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.default_copyright = Some(copyright.into());
        self
    }

    pub fn with_banner(mut self, emit: bool) -> Self {
        self.emit_banner = emit;
        self
    }

    pub fn with_legacy_recovery(mut self, recover: bool) -> Self {
        self.recover_legacy_code = recover;
        self
    }

    /// One indentation level as spaces.
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }

    /// Load settings from a `.json`, `.yaml` or `.yml` file.
    #[cfg(feature = "serde")]
    pub fn read_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let config = match ext.as_str() {
            "json" => serde_json::from_str(&text).map_err(|e| ConfigError::Json(e.to_string()))?,
            "yaml" | "yml" => {
                serde_yaml::from_str(&text).map_err(|e| ConfigError::Yaml(e.to_string()))?
            }
            _ => return Err(ConfigError::UnknownFormat(path.display().to_string())),
        };
        tracing::debug!("loaded generator config from {}", path.display());
        Ok(config)
    }
}
