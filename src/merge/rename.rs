//! Pending member renames and deletions between two generations.

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use crate::codegen::ZoneId;
use crate::model::MemberKind;

type Key = (MemberKind, SmolStr);

/// What happens to a zone id read from a prior file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ZoneResolution {
    /// The zone keeps its id.
    Keep(ZoneId),
    /// The owning member was renamed; the zone moves to this id.
    Renamed(ZoneId),
    /// The owning member was deleted; the zone is dropped.
    Dropped,
}

/// Records member renames and deletions since the last generation.
///
/// Keys are the names as they appear in the last generated files, so a
/// chain `A -> B -> C` is stored as `A -> C`.
#[derive(Clone, Debug, Default)]
pub struct RenameTracker {
    /// Generated name -> current name.
    renames: FxHashMap<Key, SmolStr>,
    /// Generated names whose member is gone.
    deleted: FxHashSet<Key>,
    /// Members added since the last generation. They own no zones in the
    /// prior files, so renaming or deleting them never touches the entries
    /// above.
    added: FxHashSet<Key>,
}

impl RenameTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nothing pending.
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty() && self.deleted.is_empty()
    }

    pub fn record_rename(&mut self, kind: MemberKind, old: &str, new: &str) {
        if old == new {
            return;
        }
        if self.added.remove(&(kind, SmolStr::new(old))) {
            tracing::trace!("rename of added {kind} '{old}' -> '{new}'");
            self.added.insert((kind, SmolStr::new(new)));
            return;
        }
        let origin = self
            .renames
            .iter()
            .find(|((k, _), current)| *k == kind && current.as_str() == old)
            .map(|(key, _)| key.clone());
        let origin = match origin {
            Some(key) => {
                self.renames.remove(&key);
                key
            }
            None => (kind, SmolStr::new(old)),
        };
        tracing::trace!("rename {kind} '{}' -> '{new}'", origin.1);
        if origin.1 != new {
            self.renames.insert(origin, SmolStr::new(new));
        }
    }

    pub fn record_delete(&mut self, kind: MemberKind, name: &str) {
        if self.added.remove(&(kind, SmolStr::new(name))) {
            tracing::trace!("added {kind} '{name}' removed again");
            return;
        }
        let origin = self
            .renames
            .iter()
            .find(|((k, _), current)| *k == kind && current.as_str() == name)
            .map(|(key, _)| key.clone());
        let origin = match origin {
            Some(key) => {
                self.renames.remove(&key);
                key
            }
            None => (kind, SmolStr::new(name)),
        };
        tracing::trace!("delete {kind} '{}'", origin.1);
        self.deleted.insert(origin);
    }

    /// A member was (re)added. A pending deletion of that name is cancelled
    /// so its hand-written zones come back; any other name is new.
    pub fn record_add(&mut self, kind: MemberKind, name: &str) {
        let key = (kind, SmolStr::new(name));
        if self.deleted.remove(&key) {
            tracing::trace!("re-added {kind} '{name}', deletion cancelled");
        } else {
            self.added.insert(key);
        }
    }

    /// Map a zone id from a prior file onto the current model.
    pub fn resolve_zone_id(&self, id: &ZoneId) -> ZoneResolution {
        let Some((kind, name, _)) = id.member_parts() else {
            return ZoneResolution::Keep(id.clone());
        };
        let key = (kind, SmolStr::new(name));
        if self.deleted.contains(&key) {
            return ZoneResolution::Dropped;
        }
        match self.renames.get(&key).and_then(|new| id.with_member_name(new)) {
            Some(moved) => ZoneResolution::Renamed(moved),
            None => ZoneResolution::Keep(id.clone()),
        }
    }

    /// Forget everything; called once a generation has been applied.
    pub fn clear(&mut self) {
        self.renames.clear();
        self.deleted.clear();
        self.added.clear();
    }
}
