//! Editing operations on class descriptions.

use std::sync::Arc;

use devgen::error::ModelError;
use devgen::model::{
    Attribute, ClassDescription, Command, DataType, MemberKey, MemberKind, State, TargetLanguage,
};

use crate::helpers::fixtures::{CPP_AXIS, axis, gauge};

#[test]
fn rejected_edits_leave_class_untouched() {
    let mut class = gauge(TargetLanguage::NativeCompiled);
    let before = class.clone();

    assert!(class.add_attribute(Attribute::new("Pressure", DataType::Double)).is_err());
    assert!(class.add_attribute(Attribute::new("bad name", DataType::Double)).is_err());
    assert!(class
        .rename_member(MemberKind::Attribute, "Pressure", "Temperature")
        .is_err());
    assert!(class.remove_member(MemberKind::Command, "Missing").is_err());
    assert!(class.add_state(State::new("ON", "again")).is_err());
    assert!(class
        .set_allowed_states(MemberKey::command("Missing"), ["ON"])
        .is_err());

    assert_eq!(class, before);
}

#[test]
fn remove_member_drops_constraints() {
    let mut class = gauge(TargetLanguage::ScriptedStandard);
    class.remove_member(MemberKind::Command, "Calibrate").unwrap();
    assert!(class.command("Calibrate").is_none());
    assert!(class
        .state_machine
        .allowed_states(&MemberKey::command("Calibrate"))
        .is_none());
}

#[test]
fn names_are_unique_per_kind_only() {
    let mut class = ClassDescription::new("Shutter", TargetLanguage::ManagedVm).unwrap();
    class.add_attribute(Attribute::new("Open", DataType::Boolean)).unwrap();
    class.add_command(Command::new("Open")).unwrap();
    let err = class.add_command(Command::new("Open")).unwrap_err();
    assert_eq!(err, ModelError::duplicate(MemberKind::Command, "Open"));
}

#[test]
fn language_guard_on_ancestor_attach() {
    let java_base = Arc::new(axis(TargetLanguage::ManagedVm));
    let mut class = ClassDescription::new("Motor", TargetLanguage::NativeCompiled).unwrap();
    let err = class.add_ancestor(java_base).unwrap_err();
    assert!(matches!(err, ModelError::LanguageMismatch { .. }));
    assert!(class.ancestors().is_empty());
}

#[test]
fn shared_ancestor_attaches_to_many_classes() {
    let mut a = ClassDescription::new("Motor", TargetLanguage::NativeCompiled).unwrap();
    let mut b = ClassDescription::new("Slit", TargetLanguage::NativeCompiled).unwrap();
    a.add_ancestor(CPP_AXIS.clone()).unwrap();
    b.add_ancestor(CPP_AXIS.clone()).unwrap();
    assert!(Arc::ptr_eq(&a.ancestors()[0], &b.ancestors()[0]));
    assert!(a.is_derived());
}

#[test]
fn add_ancestor_appends_root_most() {
    let mut class = ClassDescription::new("Motor", TargetLanguage::NativeCompiled).unwrap();
    class.add_ancestor(CPP_AXIS.clone()).unwrap();
    let root = ClassDescription::new("Device", TargetLanguage::NativeCompiled).unwrap();
    class.add_ancestor(Arc::new(root)).unwrap();
    let names: Vec<_> = class.ancestors().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Axis", "Device"]);
    assert_eq!(class.direct_parent().map(|p| p.name.as_str()), Some("Axis"));
}

#[test]
fn ancestor_named_like_class_is_a_cycle() {
    let mut class = ClassDescription::new("Axis", TargetLanguage::NativeCompiled).unwrap();
    let err = class.add_ancestor(CPP_AXIS.clone()).unwrap_err();
    assert!(matches!(err, ModelError::InheritanceCycle { .. }));
}
