//! Inheritance resolution tests

pub mod tests_inheritance;
