//! Code emission tests
//!
//! - File sets and zone ids per language
//! - Determinism
//! - Construct validation
//! - Multi-class servers

pub mod tests_emitters;
pub mod tests_server;
pub mod tests_validation;
