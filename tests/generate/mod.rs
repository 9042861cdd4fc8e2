//! Generation pipeline tests
//!
//! - Prior files from a directory
//! - Error ordering (model and emission errors before any read)
//! - Config loading

pub mod tests_config;
pub mod tests_pipeline;
