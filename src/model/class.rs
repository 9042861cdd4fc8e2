//! The root entity: one device class and its ancestor chain.
//!
//! ## Design
//!
//! A `ClassDescription` owns its local members in ordered sequences, one per
//! kind. Ancestors are shared, read-only `Arc<ClassDescription>` values:
//!
//! ```text
//! ClassDescription
//! ├── attributes / commands / class_properties / device_properties / pipes
//! ├── state_machine: StateMachine
//! └── ancestors: Vec<Arc<ClassDescription>>   ([0] = direct parent, last = root)
//! ```
//!
//! Every editing operation validates before mutating: a rejected operation
//! leaves the description untouched.

use std::sync::Arc;

use smol_str::SmolStr;

use super::language::{License, TargetLanguage};
use super::members::{Attribute, Command, Member, MemberKind, Pipe, Property};
use super::state_machine::{MemberKey, State, StateMachine};
use crate::base::{normalize_class_name, validate_member_name};
use crate::error::ModelError;

/// Schema revision written by this version of the tool.
pub const CURRENT_SCHEMA_REVISION: &str = "9.7";

// ============================================================================
// METADATA
// ============================================================================

/// Vendor / class-family identification block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Identification {
    pub contact: String,
    pub author: String,
    pub email_domain: String,
    pub class_family: String,
    pub site_specific: String,
    pub platform: String,
    pub bus: String,
    pub manufacturer: String,
    pub reference: String,
    pub key_words: Vec<String>,
}

/// Free-text metadata of a class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassMetadata {
    pub title: String,
    pub description: String,
    pub copyright: String,
    pub license: License,
    pub identification: Identification,
    /// Where the generated sources live, as recorded by the editing session.
    pub source_path: String,
}

// ============================================================================
// CLASS DESCRIPTION
// ============================================================================

/// A device class: metadata, members, state machine and ancestors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDescription {
    pub name: SmolStr,
    pub language: TargetLanguage,
    pub metadata: ClassMetadata,
    /// `None` marks a description produced by a legacy tool version.
    pub schema_revision: Option<SmolStr>,
    /// Abstract bases carry no hand-written bodies.
    pub is_abstract: bool,
    pub attributes: Vec<Attribute>,
    pub commands: Vec<Command>,
    pub class_properties: Vec<Property>,
    pub device_properties: Vec<Property>,
    pub pipes: Vec<Pipe>,
    pub state_machine: StateMachine,
    pub(crate) ancestors: Vec<Arc<ClassDescription>>,
}

impl ClassDescription {
    /// Create an empty class. The name is normalized.
    pub fn new(name: &str, language: TargetLanguage) -> Result<Self, ModelError> {
        Ok(Self {
            name: normalize_class_name(name)?,
            language,
            metadata: ClassMetadata::default(),
            schema_revision: Some(SmolStr::new_static(CURRENT_SCHEMA_REVISION)),
            is_abstract: false,
            attributes: Vec::new(),
            commands: Vec::new(),
            class_properties: Vec::new(),
            device_properties: Vec::new(),
            pipes: Vec::new(),
            state_machine: StateMachine::new(),
            ancestors: Vec::new(),
        })
    }

    /// Rename the class. The name is normalized.
    pub fn set_name(&mut self, name: &str) -> Result<(), ModelError> {
        self.name = normalize_class_name(name)?;
        Ok(())
    }

    // ── Query ───────────────────────────────────────────────────────

    /// Ancestors, direct parent first.
    pub fn ancestors(&self) -> &[Arc<ClassDescription>] {
        &self.ancestors
    }

    /// Whether the class inherits from anything.
    pub fn is_derived(&self) -> bool {
        !self.ancestors.is_empty()
    }

    /// The class this one directly inherits from.
    pub fn direct_parent(&self) -> Option<&Arc<ClassDescription>> {
        self.ancestors.first()
    }

    /// Whether a local member of that kind and name exists.
    pub fn has_member(&self, kind: MemberKind, name: &str) -> bool {
        self.list(kind).position_of(name).is_some()
    }

    /// Local member names of a kind, in declaration order.
    pub fn member_names(&self, kind: MemberKind) -> Vec<SmolStr> {
        self.list(kind).names()
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    // ── Mutations ───────────────────────────────────────────────────

    pub fn add_attribute(&mut self, attribute: Attribute) -> Result<(), ModelError> {
        insert(&mut self.attributes, MemberKind::Attribute, attribute)
    }

    pub fn add_command(&mut self, command: Command) -> Result<(), ModelError> {
        insert(&mut self.commands, MemberKind::Command, command)
    }

    pub fn add_class_property(&mut self, property: Property) -> Result<(), ModelError> {
        insert(&mut self.class_properties, MemberKind::ClassProperty, property)
    }

    pub fn add_device_property(&mut self, property: Property) -> Result<(), ModelError> {
        insert(&mut self.device_properties, MemberKind::DeviceProperty, property)
    }

    pub fn add_pipe(&mut self, pipe: Pipe) -> Result<(), ModelError> {
        insert(&mut self.pipes, MemberKind::Pipe, pipe)
    }

    /// Declare a state.
    pub fn add_state(&mut self, state: State) -> Result<(), ModelError> {
        validate_member_name(&state.name)?;
        if !self.state_machine.add_state(state.clone()) {
            return Err(ModelError::DuplicateState { name: state.name });
        }
        Ok(())
    }

    /// Restrict an attribute or command to a set of declared states.
    pub fn set_allowed_states<I, S>(&mut self, key: MemberKey, states: I) -> Result<(), ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        if !self.has_member(key.kind, &key.name) {
            return Err(ModelError::unknown(key.kind, key.name));
        }
        self.state_machine.set_allowed(key, states);
        Ok(())
    }

    /// Remove a local member and its state constraints.
    pub fn remove_member(&mut self, kind: MemberKind, name: &str) -> Result<(), ModelError> {
        let list = self.list_mut(kind);
        let idx = list
            .position_of(name)
            .ok_or_else(|| ModelError::unknown(kind, name))?;
        list.remove_at(idx);
        self.state_machine.clear_allowed(&MemberKey::new(kind, name));
        Ok(())
    }

    /// Rename a local member, moving its state constraints along.
    pub fn rename_member(
        &mut self,
        kind: MemberKind,
        old: &str,
        new: &str,
    ) -> Result<(), ModelError> {
        validate_member_name(new)?;
        let new = SmolStr::new(new);
        let list = self.list_mut(kind);
        let idx = list
            .position_of(old)
            .ok_or_else(|| ModelError::unknown(kind, old))?;
        if old == new {
            return Ok(());
        }
        if list.position_of(&new).is_some() {
            return Err(ModelError::duplicate(kind, new));
        }
        list.rename_at(idx, new.clone());
        self.state_machine.rename_member(kind, old, &new);
        Ok(())
    }

    /// Change the target language.
    ///
    /// A derived class must stay in its ancestors' language.
    pub fn set_language(&mut self, language: TargetLanguage) -> Result<(), ModelError> {
        if let Some(parent) = self.direct_parent() {
            if parent.language != language {
                return Err(ModelError::LanguageMismatch {
                    class: self.name.clone(),
                    ancestor: parent.name.clone(),
                    expected: parent.language,
                    found: language,
                });
            }
        }
        self.language = language;
        Ok(())
    }

    /// Append `ancestor`, followed by its own ancestors, as the new
    /// root-most part of the chain.
    pub fn add_ancestor(&mut self, ancestor: Arc<ClassDescription>) -> Result<(), ModelError> {
        let chain = chain_of(ancestor);
        self.check_chain(&chain)?;
        tracing::debug!(
            "{} now inherits from {} ({} levels added)",
            self.name,
            chain[0].name,
            chain.len()
        );
        self.ancestors.extend(chain);
        Ok(())
    }

    /// Replace the ancestor chain with `parent` and its own ancestors.
    pub fn inherit_from(&mut self, parent: Arc<ClassDescription>) -> Result<(), ModelError> {
        let chain = chain_of(parent);

        let saved = std::mem::take(&mut self.ancestors);
        if let Err(err) = self.check_chain(&chain) {
            self.ancestors = saved;
            return Err(err);
        }
        tracing::debug!("{} now inherits from {} ({} levels)", self.name, chain[0].name, chain.len());
        self.ancestors = chain;
        Ok(())
    }

    /// Check that `incoming` can extend the current chain.
    fn check_chain(&self, incoming: &[Arc<ClassDescription>]) -> Result<(), ModelError> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.ancestors.len() + incoming.len() + 1);
        seen.push(&self.name);
        seen.extend(self.ancestors.iter().map(|a| a.name.as_str()));

        for ancestor in incoming {
            if ancestor.language != self.language {
                return Err(ModelError::LanguageMismatch {
                    class: self.name.clone(),
                    ancestor: ancestor.name.clone(),
                    expected: self.language,
                    found: ancestor.language,
                });
            }
            if seen.contains(&ancestor.name.as_str()) {
                return Err(ModelError::InheritanceCycle {
                    class: self.name.clone(),
                    ancestor: ancestor.name.clone(),
                });
            }
            seen.push(&ancestor.name);
        }
        Ok(())
    }

    fn list(&self, kind: MemberKind) -> &dyn MemberList {
        match kind {
            MemberKind::Attribute => &self.attributes,
            MemberKind::Command => &self.commands,
            MemberKind::ClassProperty => &self.class_properties,
            MemberKind::DeviceProperty => &self.device_properties,
            MemberKind::Pipe => &self.pipes,
        }
    }

    fn list_mut(&mut self, kind: MemberKind) -> &mut dyn MemberList {
        match kind {
            MemberKind::Attribute => &mut self.attributes,
            MemberKind::Command => &mut self.commands,
            MemberKind::ClassProperty => &mut self.class_properties,
            MemberKind::DeviceProperty => &mut self.device_properties,
            MemberKind::Pipe => &mut self.pipes,
        }
    }
}

/// `class` followed by its ancestors, direct parent first.
fn chain_of(class: Arc<ClassDescription>) -> Vec<Arc<ClassDescription>> {
    let mut chain = Vec::with_capacity(class.ancestors.len() + 1);
    chain.push(class.clone());
    chain.extend(class.ancestors.iter().cloned());
    chain
}

// ── Member lists ────────────────────────────────────────────────────

/// Kind-erased access to one member sequence.
trait MemberList {
    fn position_of(&self, name: &str) -> Option<usize>;
    fn remove_at(&mut self, idx: usize);
    fn rename_at(&mut self, idx: usize, name: SmolStr);
    fn names(&self) -> Vec<SmolStr>;
}

impl<T: Member> MemberList for Vec<T> {
    fn position_of(&self, name: &str) -> Option<usize> {
        self.iter().position(|m| m.name() == name)
    }

    fn remove_at(&mut self, idx: usize) {
        self.remove(idx);
    }

    fn rename_at(&mut self, idx: usize, name: SmolStr) {
        self[idx].set_name(name);
    }

    fn names(&self) -> Vec<SmolStr> {
        self.iter().map(|m| m.name().clone()).collect()
    }
}

fn insert<T: Member>(list: &mut Vec<T>, kind: MemberKind, member: T) -> Result<(), ModelError> {
    validate_member_name(member.name())?;
    if list.position_of(member.name()).is_some() {
        return Err(ModelError::duplicate(kind, member.name().clone()));
    }
    list.push(member);
    Ok(())
}
