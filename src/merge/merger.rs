//! Combining a fresh skeleton with the prior version of its file.

use rustc_hash::{FxHashMap, FxHashSet};

use super::parse::parse_zones;
use super::rename::{RenameTracker, ZoneResolution};
use crate::codegen::{SourceSkeleton, ZoneId};
use crate::diagnostics::{Diagnostic, WarningKind};

/// A skeleton resolved to final text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeResult {
    pub file_name: String,
    pub text: String,
    pub warnings: Vec<Diagnostic>,
}

struct Recovered {
    body: String,
    renamed: bool,
}

/// Merge `prior` (the previous content of the skeleton's file) into the
/// skeleton's protected zones.
///
/// Without a prior text every zone takes its default. Zones are matched by
/// id after passing through `renames`; anything that cannot be matched
/// falls back to the default or is dropped, with a warning.
pub fn merge(
    skeleton: &SourceSkeleton,
    prior: Option<&str>,
    renames: &RenameTracker,
) -> MergeResult {
    let file = skeleton.file_name.as_str();
    let Some(prior) = prior else {
        tracing::debug!("{file}: no prior version, using defaults");
        return MergeResult {
            file_name: file.to_string(),
            text: skeleton.render_default(),
            warnings: Vec::new(),
        };
    };

    let parsed = parse_zones(prior, skeleton.style);
    let mut warnings: Vec<Diagnostic> = parsed
        .warnings
        .into_iter()
        .map(|d| d.in_file(file))
        .collect();
    let mut warn = |kind: WarningKind, message: String| {
        tracing::warn!("{file}: {message}");
        warnings.push(Diagnostic::new(kind, message).in_file(file));
    };

    let mut recovered: FxHashMap<ZoneId, Recovered> = FxHashMap::default();
    for (id, body) in parsed.zones {
        let (target, renamed) = match renames.resolve_zone_id(&id) {
            ZoneResolution::Dropped => {
                warn(
                    WarningKind::DroppedZone,
                    format!("zone '{id}' dropped: its member was deleted"),
                );
                continue;
            }
            ZoneResolution::Keep(id) => (id, false),
            ZoneResolution::Renamed(new_id) => {
                tracing::trace!("{file}: zone '{id}' moves to '{new_id}'");
                (new_id, true)
            }
        };
        match recovered.get_mut(&target) {
            Some(existing) => {
                warn(
                    WarningKind::RenameCollision,
                    format!("zone '{target}' recovered twice; keeping the renamed member's text"),
                );
                if renamed && !existing.renamed {
                    *existing = Recovered { body, renamed };
                }
            }
            None => {
                recovered.insert(target, Recovered { body, renamed });
            }
        }
    }

    let expected: FxHashSet<&ZoneId> = skeleton.zone_ids().collect();
    let mut orphans: Vec<&ZoneId> = recovered
        .keys()
        .filter(|id| !expected.contains(id))
        .collect();
    orphans.sort();
    for id in orphans {
        warn(
            WarningKind::OrphanedZone,
            format!("zone '{id}' no longer exists; its text was not carried over"),
        );
    }

    let text = skeleton.render_with(|id| match recovered.get(id) {
        Some(zone) => {
            tracing::trace!("{file}: zone '{id}' recovered");
            Some(zone.body.as_str())
        }
        None => {
            tracing::trace!("{file}: zone '{id}' takes its default");
            None
        }
    });
    tracing::debug!("{file}: merged, {} warning(s)", warnings.len());

    MergeResult {
        file_name: file.to_string(),
        text,
        warnings,
    }
}
