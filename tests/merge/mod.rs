//! Protected-region merge tests

pub mod tests_merge;
