//! Editing session: a class being edited plus the renames and deletions
//! the next generation has to apply to prior files.

use std::sync::Arc;

use crate::config::GeneratorConfig;
use crate::error::{GenerateError, ModelError};
use crate::generate::{GenerationOutput, Generator, PriorSource};
use crate::merge::RenameTracker;
use crate::model::{
    Attribute, ClassDescription, Command, MemberKind, Pipe, Property, TargetLanguage,
};

/// Routes member edits through both the model and a [`RenameTracker`].
///
/// Editing the class directly works too, but then the next generation does
/// not know which zones moved or went away.
#[derive(Clone, Debug)]
pub struct EditSession {
    class: ClassDescription,
    renames: RenameTracker,
}

impl EditSession {
    pub fn new(class: ClassDescription) -> Self {
        Self {
            class,
            renames: RenameTracker::new(),
        }
    }

    pub fn class(&self) -> &ClassDescription {
        &self.class
    }

    /// Direct access for edits that do not affect zone ids (metadata,
    /// states, constraints).
    pub fn class_mut(&mut self) -> &mut ClassDescription {
        &mut self.class
    }

    pub fn renames(&self) -> &RenameTracker {
        &self.renames
    }

    pub fn into_class(self) -> ClassDescription {
        self.class
    }

    pub fn add_attribute(&mut self, attribute: Attribute) -> Result<(), ModelError> {
        let name = attribute.name.clone();
        self.class.add_attribute(attribute)?;
        self.renames.record_add(MemberKind::Attribute, &name);
        Ok(())
    }

    pub fn add_command(&mut self, command: Command) -> Result<(), ModelError> {
        let name = command.name.clone();
        self.class.add_command(command)?;
        self.renames.record_add(MemberKind::Command, &name);
        Ok(())
    }

    pub fn add_class_property(&mut self, property: Property) -> Result<(), ModelError> {
        let name = property.name.clone();
        self.class.add_class_property(property)?;
        self.renames.record_add(MemberKind::ClassProperty, &name);
        Ok(())
    }

    pub fn add_device_property(&mut self, property: Property) -> Result<(), ModelError> {
        let name = property.name.clone();
        self.class.add_device_property(property)?;
        self.renames.record_add(MemberKind::DeviceProperty, &name);
        Ok(())
    }

    pub fn add_pipe(&mut self, pipe: Pipe) -> Result<(), ModelError> {
        let name = pipe.name.clone();
        self.class.add_pipe(pipe)?;
        self.renames.record_add(MemberKind::Pipe, &name);
        Ok(())
    }

    pub fn rename_member(&mut self, kind: MemberKind, old: &str, new: &str) -> Result<(), ModelError> {
        self.class.rename_member(kind, old, new)?;
        self.renames.record_rename(kind, old, new);
        Ok(())
    }

    pub fn remove_member(&mut self, kind: MemberKind, name: &str) -> Result<(), ModelError> {
        self.class.remove_member(kind, name)?;
        self.renames.record_delete(kind, name);
        Ok(())
    }

    pub fn add_ancestor(&mut self, ancestor: Arc<ClassDescription>) -> Result<(), ModelError> {
        self.class.add_ancestor(ancestor)
    }

    pub fn inherit_from(&mut self, parent: Arc<ClassDescription>) -> Result<(), ModelError> {
        self.class.inherit_from(parent)
    }

    pub fn set_language(&mut self, language: TargetLanguage) -> Result<(), ModelError> {
        self.class.set_language(language)
    }

    /// Generate with this session's pending renames and deletions.
    pub fn generate(
        &mut self,
        config: &GeneratorConfig,
        prior: &dyn PriorSource,
    ) -> Result<GenerationOutput, GenerateError> {
        Generator::new(config).generate(&self.class, prior, &mut self.renames)
    }
}
