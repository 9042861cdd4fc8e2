//! Regeneration over edited files.

use rstest::rstest;

use devgen::codegen::MarkerStyle;
use devgen::diagnostics::WarningKind;
use devgen::model::{Attribute, DataType, MemberKind, TargetLanguage};
use devgen::{EditSession, GenerationOutput, Generator, GeneratorConfig, MemorySource, RenameTracker};

use crate::helpers::fixtures::gauge;
use crate::helpers::zone_helpers::{inject, inject_everywhere, zone_body, zone_ids};

fn first_run(language: TargetLanguage) -> GenerationOutput {
    Generator::default()
        .generate(&gauge(language), &MemorySource::new(), &mut RenameTracker::new())
        .unwrap()
}

fn edit_all(output: &GenerationOutput, style: MarkerStyle) -> MemorySource {
    let mut prior = MemorySource::new();
    for (name, text) in &output.files {
        prior.insert(name.clone(), inject_everywhere(text, style));
    }
    prior
}

#[rstest]
#[case(TargetLanguage::NativeCompiled)]
#[case(TargetLanguage::ManagedVm)]
#[case(TargetLanguage::ScriptedStandard)]
#[case(TargetLanguage::ScriptedHighLevel)]
fn edited_files_regenerate_unchanged(#[case] language: TargetLanguage) {
    let style = MarkerStyle::for_language(language);
    let first = first_run(language);
    let prior = edit_all(&first, style);

    let second = Generator::default()
        .generate(&gauge(language), &prior, &mut RenameTracker::new())
        .unwrap();
    assert!(second.warnings.is_empty(), "{:?}", second.warnings);
    for (name, text) in &second.files {
        let edited = prior_text(&prior, name);
        assert_eq!(text, &edited, "{language}: {name} changed");
    }
}

fn prior_text(prior: &MemorySource, name: &str) -> String {
    use devgen::PriorSource;
    prior.read_prior(name).unwrap().unwrap()
}

#[test]
fn untouched_output_is_a_fixed_point() {
    let first = first_run(TargetLanguage::NativeCompiled);
    let second = Generator::default()
        .generate(
            &gauge(TargetLanguage::NativeCompiled),
            &MemorySource::from(&first),
            &mut RenameTracker::new(),
        )
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn rename_moves_zone_body() {
    let language = TargetLanguage::ScriptedStandard;
    let style = MarkerStyle::Hash;
    let first = first_run(language);
    let edited = inject(
        first.file("Gauge.py").unwrap(),
        style,
        "attribute:Temperature:read-implementation",
        "        return self.sensor.read()\n",
    );
    let prior = MemorySource::new().with_file("Gauge.py", edited);

    let mut session = EditSession::new(gauge(language));
    session
        .rename_member(MemberKind::Attribute, "Temperature", "Temp")
        .unwrap();
    let out = session.generate(&GeneratorConfig::default(), &prior).unwrap();
    let text = out.file("Gauge.py").unwrap();

    assert_eq!(
        zone_body(text, style, "attribute:Temp:read-implementation").as_deref(),
        Some("        return self.sensor.read()\n")
    );
    assert!(!zone_ids(text, style).iter().any(|id| id.contains("Temperature")));
    assert!(out.warnings.is_empty(), "{:?}", out.warnings);
    assert!(session.renames().is_empty());
}

#[test]
fn renamed_then_reused_name_does_not_steal_code() {
    let language = TargetLanguage::ScriptedStandard;
    let style = MarkerStyle::Hash;
    let first = first_run(language);
    let edited = inject(
        first.file("Gauge.py").unwrap(),
        style,
        "attribute:Temperature:read-implementation",
        "        return self.sensor.read()\n",
    );
    let prior = MemorySource::new().with_file("Gauge.py", edited);

    let mut session = EditSession::new(gauge(language));
    session
        .rename_member(MemberKind::Attribute, "Temperature", "Temp")
        .unwrap();
    session
        .add_attribute(Attribute::new("Temperature", DataType::Double))
        .unwrap();
    session
        .rename_member(MemberKind::Attribute, "Temperature", "T2")
        .unwrap();
    let out = session.generate(&GeneratorConfig::default(), &prior).unwrap();
    let text = out.file("Gauge.py").unwrap();

    assert_eq!(
        zone_body(text, style, "attribute:Temp:read-implementation").as_deref(),
        Some("        return self.sensor.read()\n")
    );
    let fresh = zone_body(text, style, "attribute:T2:read-implementation").unwrap();
    assert!(!fresh.contains("sensor"));
    assert!(out.warnings.is_empty(), "{:?}", out.warnings);
}

#[test]
fn deleted_member_drops_zone_with_warning() {
    let language = TargetLanguage::ManagedVm;
    let first = first_run(language);
    let prior = edit_all(&first, MarkerStyle::Block);

    let mut session = EditSession::new(gauge(language));
    session.remove_member(MemberKind::Attribute, "Pressure").unwrap();
    let out = session.generate(&GeneratorConfig::default(), &prior).unwrap();

    assert!(!out.file("Gauge.java").unwrap().contains("Pressure"));
    assert!(out
        .warnings
        .iter()
        .all(|w| w.kind == WarningKind::DroppedZone));
    assert!(!out.warnings.is_empty());
    assert!(out
        .warnings
        .iter()
        .all(|w| w.message.contains("Pressure") && w.file.as_deref() == Some("Gauge.java")));
}

#[test]
fn untracked_removal_orphans_zone() {
    let language = TargetLanguage::ScriptedHighLevel;
    let first = first_run(language);
    let prior = edit_all(&first, MarkerStyle::Hash);

    let mut class = gauge(language);
    class.remove_member(MemberKind::Command, "Status").unwrap();
    let out = Generator::default()
        .generate(&class, &prior, &mut RenameTracker::new())
        .unwrap();
    assert!(!out.warnings.is_empty());
    assert!(out
        .warnings
        .iter()
        .all(|w| w.kind == WarningKind::OrphanedZone && w.message.contains("Status")));
}

#[test]
fn added_member_gets_default_body() {
    let language = TargetLanguage::NativeCompiled;
    let first = first_run(language);
    let prior = edit_all(&first, MarkerStyle::Block);

    let mut session = EditSession::new(gauge(language));
    session
        .add_attribute(Attribute::new("Humidity", DataType::Double))
        .unwrap();
    let out = session.generate(&GeneratorConfig::default(), &prior).unwrap();
    let source = out.file("Gauge.cpp").unwrap();

    let body = zone_body(source, MarkerStyle::Block, "attribute:Humidity:read-implementation")
        .unwrap();
    assert!(!body.contains("user code for"));
    assert_eq!(
        zone_body(source, MarkerStyle::Block, "attribute:Temperature:read-implementation")
            .unwrap()
            .trim(),
        "user code for attribute:Temperature:read-implementation"
    );
}

#[test]
fn unclosed_zone_falls_back_to_default() {
    let language = TargetLanguage::ScriptedStandard;
    let first = first_run(language);
    let text = first.file("Gauge.py").unwrap();
    let end = MarkerStyle::Hash.end(&devgen::ZoneId::from_raw("class:init-device"));
    let broken: String = text
        .lines()
        .filter(|line| line.trim() != end)
        .map(|line| format!("{line}\n"))
        .collect();
    let prior = MemorySource::new().with_file("Gauge.py", broken);

    let out = Generator::default()
        .generate(&gauge(language), &prior, &mut RenameTracker::new())
        .unwrap();
    assert_eq!(out.file("Gauge.py"), first.file("Gauge.py"));
    assert!(out
        .warnings
        .iter()
        .any(|w| w.kind == WarningKind::MalformedProtectedRegion));
}
