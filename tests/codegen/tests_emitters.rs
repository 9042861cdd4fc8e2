//! Per-language emission: file sets, zone ids and determinism.

use rstest::rstest;

use devgen::codegen::{CodeEmitter, MarkerStyle, SourceSkeleton};
use devgen::model::{Attribute, ClassDescription, DataType, TargetLanguage};
use devgen::{GeneratorConfig, resolve};

use crate::helpers::fixtures::{gauge, motor_over_axis};

fn emit(class: &ClassDescription) -> Vec<SourceSkeleton> {
    let iface = resolve(class).unwrap();
    CodeEmitter::for_language(class.language)
        .emit(&iface, class, &GeneratorConfig::default())
        .unwrap()
}

fn all_zone_ids(skeletons: &[SourceSkeleton]) -> Vec<String> {
    skeletons
        .iter()
        .flat_map(|s| s.zone_ids())
        .map(|id| id.as_str().to_string())
        .collect()
}

#[rstest]
#[case(TargetLanguage::NativeCompiled, &["Gauge.h", "Gauge.cpp", "GaugeStateMachine.cpp"])]
#[case(TargetLanguage::ManagedVm, &["Gauge.java"])]
#[case(TargetLanguage::ScriptedStandard, &["Gauge.py"])]
#[case(TargetLanguage::ScriptedHighLevel, &["Gauge.py"])]
fn file_set(#[case] language: TargetLanguage, #[case] expected: &[&str]) {
    let skeletons = emit(&gauge(language));
    let names: Vec<_> = skeletons.iter().map(|s| s.file_name.as_str()).collect();
    assert_eq!(names, expected);
    assert!(skeletons
        .iter()
        .all(|s| s.style == MarkerStyle::for_language(language)));
}

#[rstest]
#[case(TargetLanguage::NativeCompiled)]
#[case(TargetLanguage::ManagedVm)]
#[case(TargetLanguage::ScriptedStandard)]
#[case(TargetLanguage::ScriptedHighLevel)]
fn emission_is_deterministic(#[case] language: TargetLanguage) {
    let class = gauge(language);
    assert_eq!(emit(&class), emit(&class));
}

#[rstest]
#[case(TargetLanguage::NativeCompiled)]
#[case(TargetLanguage::ManagedVm)]
#[case(TargetLanguage::ScriptedStandard)]
#[case(TargetLanguage::ScriptedHighLevel)]
fn zone_ids_survive_unrelated_additions(#[case] language: TargetLanguage) {
    let class = gauge(language);
    let before = all_zone_ids(&emit(&class));

    let mut grown = class.clone();
    grown
        .attributes
        .insert(0, Attribute::new("Humidity", DataType::Double));
    let after = all_zone_ids(&emit(&grown));

    for id in &before {
        assert!(after.contains(id), "{language}: lost zone {id}");
    }
    assert!(after
        .iter()
        .any(|id| id == "attribute:Humidity:read-implementation"));
}

#[rstest]
#[case(TargetLanguage::NativeCompiled)]
#[case(TargetLanguage::ManagedVm)]
#[case(TargetLanguage::ScriptedStandard)]
#[case(TargetLanguage::ScriptedHighLevel)]
fn every_language_has_lifecycle_zones(#[case] language: TargetLanguage) {
    let ids = all_zone_ids(&emit(&gauge(language)));
    for role in ["includes", "members", "init-device", "delete-device", "additional-methods"] {
        let id = format!("class:{role}");
        assert!(ids.contains(&id), "{language}: missing {id}");
    }
    assert!(ids.contains(&"command:Calibrate:execute-implementation".to_string()));
    assert!(ids.contains(&"attribute:Temperature:write-implementation".to_string()));
    assert!(!ids.contains(&"attribute:Pressure:write-implementation".to_string()));
}

#[rstest]
#[case(TargetLanguage::NativeCompiled)]
#[case(TargetLanguage::ManagedVm)]
#[case(TargetLanguage::ScriptedStandard)]
#[case(TargetLanguage::ScriptedHighLevel)]
fn inherited_members_get_no_zones(#[case] language: TargetLanguage) {
    let ids = all_zone_ids(&emit(&motor_over_axis(language)));
    assert!(ids.contains(&"attribute:Position:read-implementation".to_string()));
    assert!(ids.contains(&"attribute:Current:read-implementation".to_string()));
    assert!(!ids.iter().any(|id| id.starts_with("attribute:Velocity:")));
    assert!(!ids.iter().any(|id| id.starts_with("command:Stop:")));
}

#[test]
fn comment_terminator_in_description_is_escaped() {
    let mut class = gauge(TargetLanguage::NativeCompiled);
    class.metadata.description = "ends here */ int evil;".into();
    for skeleton in emit(&class) {
        let text = skeleton.render_default();
        assert!(!text.contains("*/ int evil"), "{}", skeleton.file_name);
    }
}

#[test]
fn banner_can_be_disabled() {
    let class = gauge(TargetLanguage::ScriptedStandard);
    let iface = resolve(&class).unwrap();
    let config = GeneratorConfig::default().with_banner(false);
    let text = CodeEmitter::Python
        .emit(&iface, &class, &config)
        .unwrap()
        .remove(0)
        .render_default();
    assert!(!text.contains("This file is generated by devgen"));
}
