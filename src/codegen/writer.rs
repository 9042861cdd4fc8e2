//! Indentation-aware builder for source skeletons.

use super::skeleton::SourceSkeleton;
use super::zone::{MarkerStyle, ZoneId};
use crate::base::indent_lines;

/// Writes lines and zones into a [`SourceSkeleton`] at the current
/// indentation level.
pub(crate) struct SkeletonWriter {
    skeleton: SourceSkeleton,
    unit: String,
    level: usize,
}

impl SkeletonWriter {
    pub fn new(file_name: impl Into<String>, style: MarkerStyle, unit: String) -> Self {
        Self {
            skeleton: SourceSkeleton::new(file_name, style),
            unit,
            level: 0,
        }
    }

    fn current_indent(&self) -> String {
        self.unit.repeat(self.level)
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Write one line at the current level. An empty line stays empty.
    pub fn line(&mut self, text: &str) {
        if text.is_empty() {
            self.skeleton.push_text("\n");
        } else {
            let line = format!("{}{}\n", self.current_indent(), text);
            self.skeleton.push_text(&line);
        }
    }

    pub fn blank(&mut self) {
        self.skeleton.push_text("\n");
    }

    /// Write several lines, each at the current level.
    pub fn lines(&mut self, text: &str) {
        for line in text.lines() {
            self.line(line);
        }
    }

    /// Open a protected zone at the current level. The default body is
    /// indented to the same level.
    pub fn zone(&mut self, id: ZoneId, default_text: &str) {
        let indent = self.current_indent();
        let body = indent_lines(default_text, &indent);
        self.skeleton.push_zone(id, &indent, &body);
    }

    pub fn finish(self) -> SourceSkeleton {
        self.skeleton
    }
}
