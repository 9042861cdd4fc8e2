//! Untyped records read from descriptions written by older tool versions.

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A loosely typed value, as found in legacy description files.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<RawValue>),
    Record(RawRecord),
}

/// Keyed fields, in file order.
pub type RawRecord = IndexMap<String, RawValue>;

impl RawValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Booleans, also written as `"true"` / `"false"` by some versions.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Non-negative integers, also written as text.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Number(n) if *n >= 0.0 && n.fract() == 0.0 && *n <= u32::MAX as f64 => {
                Some(*n as u32)
            }
            Self::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[RawValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RawRecord> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Text items of a list; a single text counts as a one-item list.
    pub fn text_items(&self) -> Vec<String> {
        match self {
            Self::Text(text) => vec![text.clone()],
            Self::List(items) => items
                .iter()
                .filter_map(|item| match item {
                    Self::Text(text) => Some(text.clone()),
                    Self::Number(n) => Some(n.to_string()),
                    Self::Bool(b) => Some(b.to_string()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A legacy description: the record plus the generated sources that sat
/// next to it, keyed by file name.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LegacyDescription {
    pub record: RawRecord,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sources: IndexMap<String, String>,
}

impl LegacyDescription {
    pub fn new(record: RawRecord) -> Self {
        Self {
            record,
            sources: IndexMap::new(),
        }
    }

    pub fn with_source(mut self, file_name: impl Into<String>, text: impl Into<String>) -> Self {
        self.sources.insert(file_name.into(), text.into());
        self
    }

    /// Read a record from JSON text.
    #[cfg(feature = "serde")]
    pub fn record_from_json(text: &str) -> Result<RawRecord, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Read a record from YAML text.
    #[cfg(feature = "serde")]
    pub fn record_from_yaml(text: &str) -> Result<RawRecord, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}
