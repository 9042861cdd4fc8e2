//! Multi-class servers: several device classes in one executable.

use std::sync::Arc;

use smol_str::SmolStr;

use super::class::ClassDescription;
use super::language::{License, TargetLanguage};
use crate::base::normalize_class_name;
use crate::error::ModelError;

/// A server executable grouping several device classes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerDescription {
    pub name: SmolStr,
    pub title: String,
    pub description: String,
    pub license: License,
    pub source_path: String,
    pub classes: Vec<Arc<ClassDescription>>,
}

impl ServerDescription {
    pub fn new(name: &str) -> Result<Self, ModelError> {
        Ok(Self {
            name: normalize_class_name(name)?,
            title: String::new(),
            description: String::new(),
            license: License::default(),
            source_path: String::new(),
            classes: Vec::new(),
        })
    }

    /// Add a class; every class of a server shares one language.
    pub fn add_class(&mut self, class: Arc<ClassDescription>) -> Result<(), ModelError> {
        if let Some(first) = self.classes.first() {
            if first.language != class.language {
                return Err(ModelError::LanguageMismatch {
                    class: self.name.clone(),
                    ancestor: class.name.clone(),
                    expected: first.language,
                    found: class.language,
                });
            }
        }
        if self.classes.iter().any(|c| c.name == class.name) {
            return Err(ModelError::DuplicateClass {
                server: self.name.clone(),
                class: class.name.clone(),
            });
        }
        self.classes.push(class);
        Ok(())
    }

    /// Language of the server, taken from its first class.
    pub fn language(&self) -> Option<TargetLanguage> {
        self.classes.first().map(|c| c.language)
    }
}
