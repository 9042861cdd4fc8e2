//! Multi-class server entry points.

use std::sync::Arc;

use rstest::rstest;

use devgen::codegen::emit_server;
use devgen::model::{ServerDescription, TargetLanguage};
use devgen::{GeneratorConfig, ModelError};

use crate::helpers::fixtures::{axis, gauge};

fn lab(language: TargetLanguage) -> ServerDescription {
    let mut server = ServerDescription::new("Lab").unwrap();
    server.add_class(Arc::new(axis(language))).unwrap();
    server.add_class(Arc::new(gauge(language))).unwrap();
    server
}

#[rstest]
#[case(TargetLanguage::NativeCompiled, &["main.cpp", "ClassFactory.cpp"])]
#[case(TargetLanguage::ManagedVm, &["Lab.java"])]
#[case(TargetLanguage::ScriptedStandard, &["Lab.py"])]
#[case(TargetLanguage::ScriptedHighLevel, &["Lab.py"])]
fn server_files(#[case] language: TargetLanguage, #[case] expected: &[&str]) {
    let files = emit_server(&lab(language), &GeneratorConfig::default()).unwrap();
    let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(names, expected);
    let ids: Vec<_> = files
        .iter()
        .flat_map(|f| f.zone_ids())
        .map(|id| id.as_str())
        .collect();
    assert!(ids.contains(&"server:includes"));
    assert!(ids.contains(&"server:additional-classes"));
    let text: String = files.iter().map(|f| f.render_default()).collect();
    assert!(text.contains("Axis"));
    assert!(text.contains("Gauge"));
}

#[test]
fn add_class_rejects_other_language() {
    let mut server = lab(TargetLanguage::ScriptedStandard);
    let err = server
        .add_class(Arc::new(gauge(TargetLanguage::ManagedVm)))
        .unwrap_err();
    assert!(matches!(err, ModelError::LanguageMismatch { .. }));
}
