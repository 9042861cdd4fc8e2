//! Reading and editing protected zones in generated text.

use devgen::codegen::{MarkerStyle, ZoneId};
use devgen::merge::parse_zones;

/// Body of zone `id` in `text`, if present and well formed.
pub fn zone_body(text: &str, style: MarkerStyle, id: &str) -> Option<String> {
    parse_zones(text, style).zones.get(&ZoneId::from_raw(id)).cloned()
}

/// Replace the body of zone `id` with `body`, as a developer would.
pub fn inject(text: &str, style: MarkerStyle, id: &str, body: &str) -> String {
    let id = ZoneId::from_raw(id);
    let begin = style.begin(&id);
    let end = style.end(&id);
    let mut out = String::with_capacity(text.len() + body.len());
    let mut inside = false;
    let mut found = false;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed == begin {
            out.push_str(line);
            out.push_str(body);
            inside = true;
            found = true;
        } else if trimmed == end {
            out.push_str(line);
            inside = false;
        } else if !inside {
            out.push_str(line);
        }
    }
    assert!(found, "zone {id} not found");
    out
}

/// Inject a distinguishable body into every zone of `text`.
pub fn inject_everywhere(text: &str, style: MarkerStyle) -> String {
    let ids: Vec<ZoneId> = parse_zones(text, style).zones.keys().cloned().collect();
    let mut out = text.to_string();
    for id in ids {
        let body = format!("    user code for {id}\n");
        out = inject(&out, style, id.as_str(), &body);
    }
    out
}

/// All zone ids of `text`, in order.
pub fn zone_ids(text: &str, style: MarkerStyle) -> Vec<String> {
    parse_zones(text, style)
        .zones
        .keys()
        .map(|id| id.as_str().to_string())
        .collect()
}
