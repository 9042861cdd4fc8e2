//! Recovery of hand-written method bodies from legacy sources.
//!
//! Legacy generators tagged every method with a header comment naming the
//! slot it implements:
//!
//! ```text
//! //+---- method: attribute:Temperature:read-implementation
//! void Motor::read_Temperature(Tango::Attribute &attr)
//! {
//!     attr.set_value(&temp);
//! }
//!
//! #+---- method: command:Start:execute-implementation
//! def Start(self):
//!     self.motor.start()
//! ```
//!
//! Braced bodies are taken between the first `{` and its matching `}`;
//! script bodies are the lines indented deeper than the `def` line.

use indexmap::IndexMap;

use crate::codegen::{MarkerStyle, ZoneId};

const C_HEADER: &str = "//+---- method:";
const SCRIPT_HEADER: &str = "#+---- method:";

/// Bodies recovered from legacy sources, keyed by zone id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecoveredFragments {
    fragments: IndexMap<ZoneId, String>,
}

impl RecoveredFragments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a body. Later bodies for the same id replace earlier ones.
    pub fn insert(&mut self, id: ZoneId, body: impl Into<String>) {
        let mut body = body.into();
        if !body.is_empty() && !body.ends_with('\n') {
            body.push('\n');
        }
        self.fragments.insert(id, body);
    }

    pub fn get(&self, id: &ZoneId) -> Option<&str> {
        self.fragments.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &ZoneId) -> bool {
        self.fragments.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ZoneId, &str)> {
        self.fragments.iter().map(|(id, body)| (id, body.as_str()))
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&ZoneId) -> bool) {
        self.fragments.retain(|id, _| keep(id));
    }

    /// Render the fragments as marker-delimited zones, the shape of a
    /// previously generated file, so the ordinary merge can consume them.
    pub fn as_prior_text(&self, style: MarkerStyle) -> String {
        self.prior_text_where(style, |_| true)
    }

    /// Like [`as_prior_text`](Self::as_prior_text), limited to some ids.
    pub fn prior_text_where(
        &self,
        style: MarkerStyle,
        mut include: impl FnMut(&ZoneId) -> bool,
    ) -> String {
        let mut out = String::new();
        for (id, body) in &self.fragments {
            if !include(id) {
                continue;
            }
            out.push_str(&style.begin(id));
            out.push('\n');
            out.push_str(body);
            out.push_str(&style.end(id));
            out.push('\n');
        }
        out
    }
}

/// A tagged method found in a source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Extracted {
    pub id: ZoneId,
    /// `None` when the tagged method has no recognizable body.
    pub body: Option<String>,
}

/// Find every tagged method body in `text`.
pub(crate) fn extract(text: &str) -> Vec<Extracted> {
    let lines: Vec<&str> = text.lines().collect();
    let mut found = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        let (raw_id, braced) = if let Some(rest) = trimmed.strip_prefix(C_HEADER) {
            (rest.trim(), true)
        } else if let Some(rest) = trimmed.strip_prefix(SCRIPT_HEADER) {
            (rest.trim(), false)
        } else {
            continue;
        };
        let id = ZoneId::from_raw(raw_id);
        if id.member_parts().is_none() && !raw_id.starts_with("class:") {
            continue;
        }
        let rest = &lines[idx + 1..];
        let body = if braced {
            braced_body(rest)
        } else {
            indented_body(rest)
        };
        found.push(Extracted {
            id,
            body: body.filter(|b| !b.trim().is_empty()),
        });
    }
    found
}

fn is_header(line: &str) -> bool {
    let line = line.trim();
    line.starts_with(C_HEADER) || line.starts_with(SCRIPT_HEADER)
}

/// Lines strictly between the first `{` line and its matching `}` line.
fn braced_body(lines: &[&str]) -> Option<String> {
    let open = lines
        .iter()
        .take_while(|l| !is_header(l))
        .position(|l| l.contains('{'))?;
    let mut depth: i64 = 0;
    let mut body = String::new();
    for (offset, line) in lines[open..].iter().enumerate() {
        let opens = line.matches('{').count() as i64;
        let closes = line.matches('}').count() as i64;
        if offset > 0 {
            if depth + opens - closes <= 0 && line.trim_start().starts_with('}') {
                return Some(body);
            }
            body.push_str(line);
            body.push('\n');
        }
        depth += opens - closes;
        if depth <= 0 {
            return Some(body);
        }
    }
    None
}

/// Lines indented deeper than the first code line, trailing blanks removed.
fn indented_body(lines: &[&str]) -> Option<String> {
    let def = lines.iter().position(|l| !l.trim().is_empty())?;
    let base = indentation(lines[def]);
    let mut kept: Vec<&str> = Vec::new();
    for line in &lines[def + 1..] {
        if line.trim().is_empty() {
            kept.push("");
            continue;
        }
        if indentation(line) <= base || is_header(line) {
            break;
        }
        kept.push(line);
    }
    while kept.last().is_some_and(|l| l.is_empty()) {
        kept.pop();
    }
    let mut body = String::new();
    for line in kept {
        body.push_str(line);
        body.push('\n');
    }
    Some(body)
}

fn indentation(line: &str) -> usize {
    line.len() - line.trim_start().len()
}
