//! Legacy upgrade tests

pub mod tests_upgrade;
