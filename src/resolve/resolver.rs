//! Inheritance resolution.
//!
//! Walks the ancestor chain root-most first and folds every level's local
//! members into ordered maps keyed by name. A more-derived declaration
//! replaces the content of an earlier one but keeps its position, so an
//! override customizes behavior without moving the member in generated
//! documentation.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::effective::{EffectiveInterface, MemberMap, Resolved};
use crate::diagnostics::{DiagnosticCollector, WarningKind};
use crate::error::ModelError;
use crate::model::{ClassDescription, Member, MemberKey, MemberKind};

/// Compute the effective interface of `class`.
///
/// Fails before any merge work if an ancestor uses another language or if
/// any class in the chain declares a (kind, name) twice.
pub fn resolve(class: &ClassDescription) -> Result<EffectiveInterface, ModelError> {
    check_languages(class)?;

    let chain: Vec<&ClassDescription> = class
        .ancestors()
        .iter()
        .rev()
        .map(|a| a.as_ref())
        .chain(std::iter::once(class))
        .collect();

    for level in &chain {
        check_duplicates(level)?;
    }

    let mut warnings = DiagnosticCollector::new();
    let mut iface = EffectiveInterface {
        class_name: class.name.clone(),
        language: class.language,
        parent: class.direct_parent().map(|p| p.name.clone()),
        lineage: chain[..chain.len() - 1].iter().map(|c| c.name.clone()).collect(),
        ..EffectiveInterface::default()
    };

    for level in &chain {
        let is_target = std::ptr::eq(*level, class);
        let mut fold = Fold {
            origin: &level.name,
            is_target,
            warnings: &mut warnings,
        };
        fold.members(&mut iface.class_properties, &level.class_properties, MemberKind::ClassProperty);
        fold.members(&mut iface.device_properties, &level.device_properties, MemberKind::DeviceProperty);
        fold.members(&mut iface.commands, &level.commands, MemberKind::Command);
        fold.members(&mut iface.attributes, &level.attributes, MemberKind::Attribute);
        fold.members(&mut iface.pipes, &level.pipes, MemberKind::Pipe);

        for state in &level.state_machine.states {
            iface
                .states
                .entry(state.name.clone())
                .and_modify(|s| {
                    if s.description.is_empty() {
                        s.description = state.description.clone();
                    }
                })
                .or_insert_with(|| state.clone());
        }
        for (key, states) in &level.state_machine.allowed {
            iface.allowed.insert(key.clone(), states.clone());
        }
    }

    prune_constraints(&mut iface, &mut warnings);

    tracing::debug!(
        "resolved {}: {} attributes, {} commands, {} properties, {} pipes, {} states ({} levels)",
        iface.class_name,
        iface.attributes.len(),
        iface.commands.len(),
        iface.class_properties.len() + iface.device_properties.len(),
        iface.pipes.len(),
        iface.states.len(),
        chain.len()
    );

    iface.warnings = warnings.finish();
    Ok(iface)
}

/// Every ancestor must share the class's language.
fn check_languages(class: &ClassDescription) -> Result<(), ModelError> {
    match class
        .ancestors()
        .iter()
        .find(|a| a.language != class.language)
    {
        Some(ancestor) => Err(ModelError::LanguageMismatch {
            class: class.name.clone(),
            ancestor: ancestor.name.clone(),
            expected: class.language,
            found: ancestor.language,
        }),
        None => Ok(()),
    }
}

fn check_duplicates(class: &ClassDescription) -> Result<(), ModelError> {
    fn first_duplicate<T: Member>(members: &[T]) -> Option<&SmolStr> {
        let mut seen = FxHashSet::default();
        members.iter().map(Member::name).find(|name| !seen.insert(*name))
    }

    let lists: [(MemberKind, Option<&SmolStr>); 5] = [
        (MemberKind::Attribute, first_duplicate(&class.attributes)),
        (MemberKind::Command, first_duplicate(&class.commands)),
        (MemberKind::ClassProperty, first_duplicate(&class.class_properties)),
        (MemberKind::DeviceProperty, first_duplicate(&class.device_properties)),
        (MemberKind::Pipe, first_duplicate(&class.pipes)),
    ];
    for (kind, dup) in lists {
        if let Some(name) = dup {
            return Err(ModelError::DuplicateLocalMember {
                class: class.name.clone(),
                kind,
                name: name.clone(),
            });
        }
    }
    Ok(())
}

/// Folds one level of the chain into the effective maps.
struct Fold<'a> {
    origin: &'a SmolStr,
    is_target: bool,
    warnings: &'a mut DiagnosticCollector,
}

impl Fold<'_> {
    fn members<T: Member>(&mut self, map: &mut MemberMap<T>, members: &[T], kind: MemberKind) {
        for member in members {
            let name = member.name().clone();
            match map.get_mut(&name) {
                Some(existing) => {
                    let shadowed = existing.origin.clone();
                    if self.is_target {
                        let (warning, text) = if member.is_override() {
                            (WarningKind::HiddenByOverride, "is overridden by")
                        } else {
                            (
                                WarningKind::ImplicitOverride,
                                "is redeclared without override marker by",
                            )
                        };
                        self.warnings.warn(
                            warning,
                            format!("{kind} '{name}' of {shadowed} {text} {}", self.origin),
                        );
                    }
                    *existing = Resolved {
                        member: member.clone(),
                        origin: self.origin.clone(),
                        inherited: !self.is_target,
                        overrides: Some(shadowed),
                    };
                }
                None => {
                    map.insert(
                        name,
                        Resolved {
                            member: member.clone(),
                            origin: self.origin.clone(),
                            inherited: !self.is_target,
                            overrides: None,
                        },
                    );
                }
            }
        }
    }
}

/// Drop constraints on members or states that are no longer part of the
/// effective interface.
fn prune_constraints(iface: &mut EffectiveInterface, warnings: &mut DiagnosticCollector) {
    let constraints = std::mem::take(&mut iface.allowed);
    let mut kept: IndexMap<MemberKey, Vec<SmolStr>> = IndexMap::with_capacity(constraints.len());

    for (key, states) in constraints {
        if !iface.contains(key.kind, &key.name) {
            warnings.warn(
                WarningKind::StaleStateConstraint,
                format!(
                    "state constraint on unknown {} '{}' ignored",
                    key.kind, key.name
                ),
            );
            continue;
        }
        let (known, unknown): (Vec<_>, Vec<_>) = states
            .into_iter()
            .partition(|s| iface.states.contains_key(s.as_str()));
        for state in &unknown {
            warnings.warn(
                WarningKind::StaleStateConstraint,
                format!(
                    "{} '{}' refers to state {} which is not declared in {}",
                    key.kind, key.name, state, iface.class_name
                ),
            );
        }
        // Nothing left of the constraint: the member is unconstrained again.
        if known.is_empty() && !unknown.is_empty() {
            continue;
        }
        kept.insert(key, known);
    }

    iface.allowed = kept;
}
