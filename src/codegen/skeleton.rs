//! Source skeletons: generated text interleaved with protected zones.

use std::fmt::Write;

use super::zone::{MarkerStyle, ZoneId};

/// One piece of a skeleton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Text owned by the generator, rewritten on every run.
    Generated(String),
    /// A developer-owned slot.
    ProtectedZone {
        id: ZoneId,
        /// Stub used when no prior content exists. Empty or newline-terminated.
        default_text: String,
        /// Leading whitespace of the marker lines.
        indent: String,
    },
}

/// One named source artifact before merging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSkeleton {
    pub file_name: String,
    pub style: MarkerStyle,
    pub segments: Vec<Segment>,
}

impl SourceSkeleton {
    pub fn new(file_name: impl Into<String>, style: MarkerStyle) -> Self {
        Self {
            file_name: file_name.into(),
            style,
            segments: Vec::new(),
        }
    }

    /// Append generated text, coalescing with a preceding generated segment.
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Generated(prev)) => prev.push_str(text),
            _ => self.segments.push(Segment::Generated(text.to_string())),
        }
    }

    /// Append a protected zone.
    pub fn push_zone(&mut self, id: ZoneId, indent: &str, default_text: &str) {
        let mut default_text = default_text.to_string();
        if !default_text.is_empty() && !default_text.ends_with('\n') {
            default_text.push('\n');
        }
        self.segments.push(Segment::ProtectedZone {
            id,
            default_text,
            indent: indent.to_string(),
        });
    }

    /// Zone ids in file order.
    pub fn zone_ids(&self) -> impl Iterator<Item = &ZoneId> {
        self.segments.iter().filter_map(|s| match s {
            Segment::ProtectedZone { id, .. } => Some(id),
            Segment::Generated(_) => None,
        })
    }

    /// Default text of a zone.
    pub fn default_text(&self, id: &ZoneId) -> Option<&str> {
        self.segments.iter().find_map(|s| match s {
            Segment::ProtectedZone {
                id: zid,
                default_text,
                ..
            } if zid == id => Some(default_text.as_str()),
            _ => None,
        })
    }

    /// Render with every zone at its default.
    pub fn render_default(&self) -> String {
        self.render_with(|_| None)
    }

    /// Render, taking each zone's body from `content` when it returns one.
    ///
    /// Marker lines always sit on their own line, so parsing the output
    /// yields exactly the bodies that went in.
    pub fn render_with<'c, F>(&self, mut content: F) -> String
    where
        F: FnMut(&ZoneId) -> Option<&'c str>,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Generated(text) => out.push_str(text),
                Segment::ProtectedZone {
                    id,
                    default_text,
                    indent,
                } => {
                    if !out.is_empty() && !out.ends_with('\n') {
                        out.push('\n');
                    }
                    let body: &str = match content(id) {
                        Some(body) => body,
                        None => default_text,
                    };
                    let _ = writeln!(out, "{indent}{}", self.style.begin(id));
                    out.push_str(body);
                    if !body.is_empty() && !body.ends_with('\n') {
                        out.push('\n');
                    }
                    let _ = writeln!(out, "{indent}{}", self.style.end(id));
                }
            }
        }
        out
    }
}
