//! Zone parser for previously generated files.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::codegen::{Marker, MarkerStyle, ZoneId};
use crate::diagnostics::{Diagnostic, DiagnosticCollector, WarningKind};

/// Zones recovered from a prior file, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedZones {
    /// Zone bodies. Every body line keeps its newline.
    pub zones: IndexMap<ZoneId, String>,
    pub warnings: Vec<Diagnostic>,
}

struct OpenZone<'t> {
    id: &'t str,
    line: usize,
    body: String,
}

/// Split `text` into zone bodies.
///
/// Anything ambiguous is left out of the result and reported:
/// a begin marker inside an open zone abandons the open zone, an end marker
/// that does not close the open zone is ignored, a zone still open at the
/// end of the text is abandoned, and an id seen twice is dropped entirely.
pub fn parse_zones(text: &str, style: MarkerStyle) -> ParsedZones {
    let mut zones: IndexMap<ZoneId, String> = IndexMap::new();
    let mut duplicates: FxHashSet<ZoneId> = FxHashSet::default();
    let mut diagnostics = DiagnosticCollector::new();
    let mut open: Option<OpenZone<'_>> = None;

    for (idx, line) in text.split_inclusive('\n').enumerate() {
        let line_no = idx + 1;
        match style.parse_line(line) {
            Some(Marker::Begin(id)) => {
                if let Some(prev) = open.take() {
                    diagnostics.warn(
                        WarningKind::MalformedProtectedRegion,
                        format!(
                            "zone '{}' opened at line {} is not closed before line {line_no}",
                            prev.id, prev.line
                        ),
                    );
                }
                open = Some(OpenZone {
                    id,
                    line: line_no,
                    body: String::new(),
                });
            }
            Some(Marker::End(id)) => match open.take() {
                Some(zone) if zone.id == id => {
                    let key = ZoneId::from_raw(zone.id);
                    if duplicates.contains(&key) {
                        continue;
                    }
                    if zones.shift_remove(&key).is_some() {
                        diagnostics.warn(
                            WarningKind::MalformedProtectedRegion,
                            format!("zone '{id}' appears more than once; using its default"),
                        );
                        duplicates.insert(key);
                    } else {
                        zones.insert(key, zone.body);
                    }
                }
                Some(zone) => {
                    diagnostics.warn(
                        WarningKind::MalformedProtectedRegion,
                        format!(
                            "end marker for '{id}' at line {line_no} does not close zone '{}'",
                            zone.id
                        ),
                    );
                    open = Some(zone);
                }
                None => diagnostics.warn(
                    WarningKind::MalformedProtectedRegion,
                    format!("end marker for '{id}' at line {line_no} has no begin marker"),
                ),
            },
            None => {
                if let Some(zone) = open.as_mut() {
                    zone.body.push_str(line);
                    if !line.ends_with('\n') {
                        zone.body.push('\n');
                    }
                }
            }
        }
    }

    if let Some(zone) = open {
        diagnostics.warn(
            WarningKind::MalformedProtectedRegion,
            format!("zone '{}' opened at line {} is never closed", zone.id, zone.line),
        );
    }

    ParsedZones {
        zones,
        warnings: diagnostics.finish(),
    }
}
