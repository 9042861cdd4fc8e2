//! End-to-end generation against a directory of prior files.

use std::cell::Cell;
use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use devgen::codegen::MarkerStyle;
use devgen::model::{
    AttrFormat, Attribute, ClassDescription, DataType, MemberKind, ServerDescription, TargetLanguage,
};
use devgen::{
    DirectorySource, GenerateError, GenerationOutput, Generator, MemorySource, PriorSource,
    RenameTracker,
};

use crate::helpers::fixtures::{axis, gauge};
use crate::helpers::zone_helpers::{inject, zone_body};

/// Counts reads and never finds a file.
#[derive(Default)]
struct CountingSource {
    reads: Cell<usize>,
}

impl PriorSource for CountingSource {
    fn read_prior(&self, _file_name: &str) -> Result<Option<String>, GenerateError> {
        self.reads.set(self.reads.get() + 1);
        Ok(None)
    }
}

fn write_all(dir: &TempDir, output: &GenerationOutput) {
    for (name, text) in &output.files {
        fs::write(dir.path().join(name), text).unwrap();
    }
}

#[test]
fn directory_round_trip() {
    let dir = TempDir::new().unwrap();
    let source = DirectorySource::new(dir.path());
    let class = gauge(TargetLanguage::NativeCompiled);
    let generator = Generator::default();

    let first = generator
        .generate(&class, &source, &mut RenameTracker::new())
        .unwrap();
    write_all(&dir, &first);

    let path = dir.path().join("Gauge.cpp");
    let edited = inject(
        &fs::read_to_string(&path).unwrap(),
        MarkerStyle::Block,
        "command:Calibrate:execute-implementation",
        "    offset_ = argin;\n",
    );
    fs::write(&path, &edited).unwrap();

    let second = generator
        .generate(&class, &source, &mut RenameTracker::new())
        .unwrap();
    assert_eq!(second.file("Gauge.cpp"), Some(edited.as_str()));
    assert_eq!(second.file("Gauge.h"), first.file("Gauge.h"));
    assert!(second.warnings.is_empty());
}

#[test]
fn missing_directory_means_first_generation() {
    let dir = TempDir::new().unwrap();
    let source = DirectorySource::new(dir.path().join("not-there"));
    let out = Generator::default()
        .generate(
            &gauge(TargetLanguage::ManagedVm),
            &source,
            &mut RenameTracker::new(),
        )
        .unwrap();
    assert_eq!(out.file_names().collect::<Vec<_>>(), ["Gauge.java"]);
}

#[test]
fn unreadable_prior_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("Gauge.py")).unwrap();
    let mut renames = RenameTracker::new();
    renames.record_delete(MemberKind::Attribute, "Pressure");

    let err = Generator::default()
        .generate(
            &gauge(TargetLanguage::ScriptedStandard),
            &DirectorySource::new(dir.path()),
            &mut renames,
        )
        .unwrap_err();
    match err {
        GenerateError::Io { file, .. } => assert!(file.ends_with("Gauge.py"), "{file}"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!renames.is_empty());
}

#[test]
fn model_errors_stop_before_any_read() {
    let mut broken = ClassDescription::new("Axis", TargetLanguage::NativeCompiled).unwrap();
    broken.attributes.push(Attribute::new("Position", DataType::Double));
    broken.attributes.push(Attribute::new("Position", DataType::Long));
    let source = CountingSource::default();

    let err = Generator::default()
        .generate(&broken, &source, &mut RenameTracker::new())
        .unwrap_err();
    assert!(matches!(err, GenerateError::Model(_)));
    assert_eq!(source.reads.get(), 0);
}

#[test]
fn codegen_errors_keep_pending_renames() {
    let mut class = gauge(TargetLanguage::ManagedVm);
    class
        .add_attribute(Attribute::new("Mode", DataType::Enum))
        .unwrap();
    let source = CountingSource::default();
    let mut renames = RenameTracker::new();
    renames.record_rename(MemberKind::Attribute, "Temp", "Temperature");

    let err = Generator::default()
        .generate(&class, &source, &mut renames)
        .unwrap_err();
    assert!(matches!(err, GenerateError::Codegen(_)));
    assert_eq!(source.reads.get(), 0);
    assert!(!renames.is_empty());
}

#[test]
fn oversized_image_is_an_emission_error() {
    let mut class = gauge(TargetLanguage::NativeCompiled);
    class
        .add_attribute(
            Attribute::new("Frame", DataType::UShort).with_format(AttrFormat::Image, 70_000, 70_000),
        )
        .unwrap();
    let err = Generator::default()
        .generate(&class, &MemorySource::new(), &mut RenameTracker::new())
        .unwrap_err();
    assert!(matches!(err, GenerateError::Codegen(_)), "{err:?}");
}

#[test]
fn reads_once_per_file() {
    let source = CountingSource::default();
    let out = Generator::default()
        .generate(
            &gauge(TargetLanguage::NativeCompiled),
            &source,
            &mut RenameTracker::new(),
        )
        .unwrap();
    assert_eq!(source.reads.get(), out.files.len());
}

#[test]
fn server_regeneration_keeps_user_code() {
    let mut server = ServerDescription::new("Lab").unwrap();
    server
        .add_class(Arc::new(axis(TargetLanguage::ScriptedHighLevel)))
        .unwrap();
    server
        .add_class(Arc::new(gauge(TargetLanguage::ScriptedHighLevel)))
        .unwrap();
    let generator = Generator::default();

    let first = generator.generate_server(&server, &MemorySource::new()).unwrap();
    let edited = inject(
        first.file("Lab.py").unwrap(),
        MarkerStyle::Hash,
        "server:includes",
        "import lab_extras\n",
    );
    let prior = MemorySource::new().with_file("Lab.py", edited.clone());

    let second = generator.generate_server(&server, &prior).unwrap();
    assert_eq!(second.file("Lab.py"), Some(edited.as_str()));
    assert_eq!(
        zone_body(&edited, MarkerStyle::Hash, "server:includes").as_deref(),
        Some("import lab_extras\n")
    );
}
