//! Upgrading class descriptions written by older tool versions.
//!
//! Legacy records are loosely typed ([`RawValue`]); [`upgrade`] maps them
//! onto the current [`ClassDescription`](crate::model::ClassDescription)
//! and, unless the class is abstract, recovers hand-written method bodies
//! from the sources that were generated from it. Recovered bodies are
//! keyed by the same zone ids the emitters use, so the first generation
//! after an upgrade reinserts them through the ordinary merge.
//!
//! Conversion degrades instead of failing: anything it cannot map becomes
//! a `LegacyConversionIncomplete` warning.

mod convert;
mod fragments;
mod raw;

pub use convert::{LegacyConversion, detect, upgrade};
pub use fragments::RecoveredFragments;
pub use raw::{LegacyDescription, RawRecord, RawValue};
