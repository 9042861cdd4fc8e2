//! Protected-region merging.
//!
//! A prior file is scanned for marker pairs, each zone id is passed through
//! the [`RenameTracker`], and the recovered bodies replace the defaults of
//! the fresh skeleton:
//!
//! ```text
//! prior text ──parse_zones──▶ id → body ──RenameTracker──▶ id' → body
//!                                                              │
//! SourceSkeleton ─────────────────────────────render_with──────┴──▶ MergeResult
//! ```
//!
//! Merging never fails. Every degradation (malformed markers, dropped,
//! orphaned or colliding zones) falls back to a defined behavior and is
//! reported as a warning on the result.

mod merger;
mod parse;
mod rename;

pub use merger::{MergeResult, merge};
pub use parse::{ParsedZones, parse_zones};
pub use rename::{RenameTracker, ZoneResolution};
