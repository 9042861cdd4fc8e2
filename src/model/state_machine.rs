//! Device states and per-member state constraints.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::members::MemberKind;

/// Identity of a member: its kind plus its name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberKey {
    pub kind: MemberKind,
    pub name: SmolStr,
}

impl MemberKey {
    pub fn new(kind: MemberKind, name: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn attribute(name: impl Into<SmolStr>) -> Self {
        Self::new(MemberKind::Attribute, name)
    }

    pub fn command(name: impl Into<SmolStr>) -> Self {
        Self::new(MemberKind::Command, name)
    }
}

/// A declared device state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
    pub name: SmolStr,
    pub description: String,
}

impl State {
    pub fn new(name: impl Into<SmolStr>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Declared states plus the states in which each member is permitted.
///
/// A member without an entry in `allowed` is permitted in every state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateMachine {
    pub states: Vec<State>,
    pub allowed: IndexMap<MemberKey, Vec<SmolStr>>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a state of that name is declared.
    pub fn has_state(&self, name: &str) -> bool {
        self.states.iter().any(|s| s.name == name)
    }

    /// Declare a state. Returns false if it already exists.
    pub fn add_state(&mut self, state: State) -> bool {
        if self.has_state(&state.name) {
            return false;
        }
        self.states.push(state);
        true
    }

    /// Remove a state and strip it from every constraint.
    pub fn remove_state(&mut self, name: &str) -> Option<State> {
        let idx = self.states.iter().position(|s| s.name == name)?;
        for states in self.allowed.values_mut() {
            states.retain(|s| s != name);
        }
        Some(self.states.remove(idx))
    }

    /// States in which `key` is permitted, or `None` if unconstrained.
    pub fn allowed_states(&self, key: &MemberKey) -> Option<&[SmolStr]> {
        self.allowed.get(key).map(Vec::as_slice)
    }

    /// Restrict `key` to `states`.
    pub fn set_allowed<I, S>(&mut self, key: MemberKey, states: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.allowed
            .insert(key, states.into_iter().map(Into::into).collect());
    }

    /// Lift every constraint on `key`.
    pub fn clear_allowed(&mut self, key: &MemberKey) {
        self.allowed.shift_remove(key);
    }

    /// Move constraints when a member is renamed, keeping their position.
    pub(crate) fn rename_member(&mut self, kind: MemberKind, old: &str, new: &SmolStr) {
        let old_key = MemberKey::new(kind, old);
        if let Some(idx) = self.allowed.get_index_of(&old_key) {
            let states = self.allowed[idx].clone();
            self.allowed.shift_remove_index(idx);
            let (end, _) = self.allowed.insert_full(MemberKey::new(kind, new.clone()), states);
            self.allowed.move_index(end, idx.min(end));
        }
    }
}
