//! Loading generator settings from files.

use std::fs;

use rstest::rstest;
use tempfile::TempDir;

use devgen::{ConfigError, GeneratorConfig};

#[rstest]
#[case("devgen.json", r#"{"indent_width": 2, "emit_banner": false}"#)]
#[case("devgen.yaml", "indent_width: 2\nemit_banner: false\n")]
#[case("devgen.yml", "indent_width: 2\nemit_banner: false\n")]
fn reads_partial_settings(#[case] file: &str, #[case] text: &str) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(file);
    fs::write(&path, text).unwrap();

    let config = GeneratorConfig::read_from_file(&path).unwrap();
    assert_eq!(config.indent_width, 2);
    assert!(!config.emit_banner);
    assert!(config.recover_legacy_code);
    assert_eq!(config.default_copyright, None);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("devgen.toml");
    fs::write(&path, "indent_width = 2").unwrap();
    let err = GeneratorConfig::read_from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownFormat(_)));
}

#[test]
fn malformed_files_report_their_format() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("bad.json");
    fs::write(&json, "{ indent_width: ").unwrap();
    assert!(matches!(
        GeneratorConfig::read_from_file(&json),
        Err(ConfigError::Json(_))
    ));

    let yaml = dir.path().join("bad.yaml");
    fs::write(&yaml, "indent_width: [1, 2").unwrap();
    assert!(matches!(
        GeneratorConfig::read_from_file(&yaml),
        Err(ConfigError::Yaml(_))
    ));
}

#[test]
fn missing_file_is_io() {
    let dir = TempDir::new().unwrap();
    let err = GeneratorConfig::read_from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
