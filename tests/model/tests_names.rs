//! Identifier normalization and validation.

use rstest::rstest;

use devgen::base::{normalize_class_name, validate_member_name};
use devgen::error::ModelError;

#[rstest]
#[case("motor", "Motor")]
#[case("power supply", "PowerSupply")]
#[case("  vacuum   gauge controller ", "VacuumGaugeController")]
#[case("Axis_2", "Axis_2")]
#[case("adcValue", "AdcValue")]
fn class_names_are_normalized(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(normalize_class_name(raw).unwrap(), expected);
}

#[rstest]
#[case("")]
#[case("2fast")]
#[case("_hidden")]
#[case("motor-controller")]
#[case("café")]
fn invalid_class_names_rejected(#[case] raw: &str) {
    let err = normalize_class_name(raw).unwrap_err();
    assert!(matches!(err, ModelError::InvalidName { .. }), "{raw}: {err:?}");
}

#[rstest]
#[case("Temperature", true)]
#[case("temp_1", true)]
#[case("1temp", false)]
#[case("temp value", false)]
fn member_names(#[case] name: &str, #[case] valid: bool) {
    assert_eq!(validate_member_name(name).is_ok(), valid, "{name}");
}
