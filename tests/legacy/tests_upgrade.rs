//! Upgrading legacy descriptions and reusing their hand-written code.

use devgen::codegen::MarkerStyle;
use devgen::diagnostics::WarningKind;
use devgen::legacy::{LegacyDescription, upgrade};
use devgen::model::{DataType, MemberKey, TargetLanguage};
use devgen::{Generator, GeneratorConfig, LegacyError, MemorySource, RenameTracker};

use crate::helpers::zone_helpers::zone_body;

const THERMO_JSON: &str = r#"{
    "pogoRevision": "6.0",
    "class_name": "Thermo",
    "language": "Python",
    "description": "Legacy thermometer",
    "states": ["ON", "FAULT"],
    "attributes": [
        {
            "name": "Temperature",
            "data_type": "DevDouble",
            "write_type": "READ_WRITE",
            "allowed_states": ["ON", "HOT"]
        }
    ],
    "commands": [
        { "name": "Reset", "description": "Clear faults" }
    ],
    "device_properties": [
        { "name": "Port", "data_type": "DevString", "mandatory": true }
    ],
    "vendor_tool": "pogo-classic"
}"#;

const THERMO_PY: &str = "\
class Thermo(PyTango.Device_4Impl):

#+---- method: attribute:Temperature:read-implementation
    def read_Temperature(self, attr):
        attr.set_value(self.sensor.read())

#+---- method: command:Reset:execute-implementation
    def Reset(self):
        self.faults.clear()
        self.set_state(PyTango.DevState.ON)
";

fn thermo() -> LegacyDescription {
    let record = LegacyDescription::record_from_json(THERMO_JSON).unwrap();
    LegacyDescription::new(record).with_source("Thermo.py", THERMO_PY)
}

#[test]
fn json_record_upgrades_with_warnings() {
    let conv = upgrade(&thermo(), &GeneratorConfig::default()).unwrap();
    let class = &conv.class;
    assert_eq!(class.name, "Thermo");
    assert_eq!(class.language, TargetLanguage::ScriptedStandard);
    assert_eq!(class.commands[0].argin.data_type, DataType::Void);
    assert!(class.device_properties[0].mandatory);
    assert_eq!(
        class
            .state_machine
            .allowed_states(&MemberKey::attribute("Temperature"))
            .map(|s| s.len()),
        Some(1)
    );

    let messages: Vec<_> = conv.warnings.iter().map(|w| w.message.as_str()).collect();
    assert_eq!(conv.warnings.len(), 3, "{messages:?}");
    assert!(conv
        .warnings
        .iter()
        .all(|w| w.kind == WarningKind::LegacyConversionIncomplete));
    assert!(messages.iter().any(|m| m.contains("vendor_tool")));
    assert!(messages.iter().any(|m| m.contains("HOT")));
    assert!(messages
        .iter()
        .any(|m| m.contains("attribute:Temperature:write-implementation")));
}

#[test]
fn recovered_bodies_land_in_zones() {
    let conv = upgrade(&thermo(), &GeneratorConfig::default()).unwrap();
    let generator = Generator::default();
    let out = generator
        .generate_with_fragments(
            &conv.class,
            &conv.fragments,
            &MemorySource::new(),
            &mut RenameTracker::new(),
        )
        .unwrap();
    let text = out.file("Thermo.py").unwrap();

    assert_eq!(
        zone_body(text, MarkerStyle::Hash, "attribute:Temperature:read-implementation").as_deref(),
        Some("        attr.set_value(self.sensor.read())\n")
    );
    assert_eq!(
        zone_body(text, MarkerStyle::Hash, "command:Reset:execute-implementation").as_deref(),
        Some("        self.faults.clear()\n        self.set_state(PyTango.DevState.ON)\n")
    );
    assert!(out.warnings.is_empty(), "{:?}", out.warnings);
}

#[test]
fn upgraded_output_is_stable() {
    let conv = upgrade(&thermo(), &GeneratorConfig::default()).unwrap();
    let generator = Generator::default();
    let first = generator
        .generate_with_fragments(
            &conv.class,
            &conv.fragments,
            &MemorySource::new(),
            &mut RenameTracker::new(),
        )
        .unwrap();
    let prior = MemorySource::from(&first);

    let again = generator
        .generate_with_fragments(&conv.class, &conv.fragments, &prior, &mut RenameTracker::new())
        .unwrap();
    assert_eq!(again.files, first.files);

    let plain = generator
        .generate(&conv.class, &prior, &mut RenameTracker::new())
        .unwrap();
    assert_eq!(plain.files, first.files);
}

#[test]
fn fragment_without_slot_is_reported() {
    let source = "\
//+---- method: class:obsolete-hook
void Pump::obsolete_hook()
{
    legacy_call();
}
";
    let yaml = "\
pogoRevision: '5.4'
class_name: Pump
language: C++
commands:
  - name: Prime
";
    let record = LegacyDescription::record_from_yaml(yaml).unwrap();
    let desc = LegacyDescription::new(record).with_source("Pump.cpp", source);
    let conv = upgrade(&desc, &GeneratorConfig::default()).unwrap();
    assert_eq!(conv.class.language, TargetLanguage::NativeCompiled);
    assert_eq!(conv.fragments.len(), 1);

    let out = Generator::default()
        .generate_with_fragments(
            &conv.class,
            &conv.fragments,
            &MemorySource::new(),
            &mut RenameTracker::new(),
        )
        .unwrap();
    assert!(out.warnings.iter().any(|w| {
        w.kind == WarningKind::LegacyConversionIncomplete && w.message.contains("class:obsolete-hook")
    }));
    assert!(!out.files.values().any(|text| text.contains("legacy_call")));
}

#[test]
fn fatal_legacy_errors() {
    let current = LegacyDescription::record_from_json(r#"{"pogoRevision": "9.1", "class_name": "X"}"#)
        .unwrap();
    assert_eq!(
        upgrade(&LegacyDescription::new(current), &GeneratorConfig::default()).unwrap_err(),
        LegacyError::NotLegacy("9.1".into())
    );

    let unnamed = LegacyDescription::record_from_json(r#"{"pogoRevision": "4.0", "class_name": ""}"#)
        .unwrap();
    assert_eq!(
        upgrade(&LegacyDescription::new(unnamed), &GeneratorConfig::default()).unwrap_err(),
        LegacyError::MissingClassName
    );
}
