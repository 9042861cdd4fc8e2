//! The effective (inherited + local) interface of a class.
//!
//! Built fresh on every generation request and never persisted.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::diagnostics::Diagnostic;
use crate::model::{Attribute, Command, MemberKey, MemberKind, Pipe, Property, State, TargetLanguage};

/// One member of the effective interface plus where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved<T> {
    pub member: T,
    /// Class whose declaration is in effect.
    pub origin: SmolStr,
    /// True if `origin` is an ancestor rather than the class itself.
    pub inherited: bool,
    /// Ancestor whose declaration this one shadows, if any.
    pub overrides: Option<SmolStr>,
}

impl<T> Resolved<T> {
    /// Whether the class being generated declares this member itself.
    pub fn is_local(&self) -> bool {
        !self.inherited
    }
}

/// Ordered map of effective members of one kind.
pub type MemberMap<T> = IndexMap<SmolStr, Resolved<T>>;

/// Result of inheritance resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectiveInterface {
    pub class_name: SmolStr,
    pub language: TargetLanguage,
    /// Direct parent, if the class is derived.
    pub parent: Option<SmolStr>,
    /// Ancestor names, root-most first.
    pub lineage: Vec<SmolStr>,
    pub attributes: MemberMap<Attribute>,
    pub commands: MemberMap<Command>,
    pub class_properties: MemberMap<Property>,
    pub device_properties: MemberMap<Property>,
    pub pipes: MemberMap<Pipe>,
    pub states: IndexMap<SmolStr, State>,
    /// Effective state constraints; all keys and states exist.
    pub allowed: IndexMap<MemberKey, Vec<SmolStr>>,
    pub warnings: Vec<Diagnostic>,
}

impl EffectiveInterface {
    /// Whether a member of that kind and name is part of the interface.
    pub fn contains(&self, kind: MemberKind, name: &str) -> bool {
        match kind {
            MemberKind::Attribute => self.attributes.contains_key(name),
            MemberKind::Command => self.commands.contains_key(name),
            MemberKind::ClassProperty => self.class_properties.contains_key(name),
            MemberKind::DeviceProperty => self.device_properties.contains_key(name),
            MemberKind::Pipe => self.pipes.contains_key(name),
        }
    }

    /// Names of one kind, in effective order.
    pub fn names(&self, kind: MemberKind) -> Vec<&SmolStr> {
        match kind {
            MemberKind::Attribute => self.attributes.keys().collect(),
            MemberKind::Command => self.commands.keys().collect(),
            MemberKind::ClassProperty => self.class_properties.keys().collect(),
            MemberKind::DeviceProperty => self.device_properties.keys().collect(),
            MemberKind::Pipe => self.pipes.keys().collect(),
        }
    }

    /// Whether a member is restricted to some states.
    pub fn allowed_states(&self, kind: MemberKind, name: &str) -> Option<&[SmolStr]> {
        self.allowed
            .get(&MemberKey::new(kind, name))
            .map(Vec::as_slice)
    }

    /// States in which a member is denied, in state declaration order.
    pub fn denied_states(&self, kind: MemberKind, name: &str) -> Vec<&SmolStr> {
        match self.allowed_states(kind, name) {
            None => Vec::new(),
            Some(allowed) => self
                .states
                .keys()
                .filter(|s| !allowed.contains(*s))
                .collect(),
        }
    }

    pub fn local_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values().filter(|r| r.is_local()).map(|r| &r.member)
    }

    pub fn local_commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.values().filter(|r| r.is_local()).map(|r| &r.member)
    }

    pub fn local_pipes(&self) -> impl Iterator<Item = &Pipe> {
        self.pipes.values().filter(|r| r.is_local()).map(|r| &r.member)
    }

    /// Every property, class-level first, with its kind.
    pub fn properties(&self) -> impl Iterator<Item = (MemberKind, &Resolved<Property>)> {
        self.class_properties
            .values()
            .map(|p| (MemberKind::ClassProperty, p))
            .chain(
                self.device_properties
                    .values()
                    .map(|p| (MemberKind::DeviceProperty, p)),
            )
    }
}
