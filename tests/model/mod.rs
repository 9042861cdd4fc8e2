//! Model layer tests
//!
//! - Class and member name rules
//! - Editing operations and their rejection paths
//! - Ancestor attachment guards

pub mod tests_editing;
pub mod tests_names;
