//! Effective interfaces of derived classes.

use std::sync::Arc;

use devgen::diagnostics::WarningKind;
use devgen::error::ModelError;
use devgen::model::{
    Attribute, ClassDescription, Command, DataType, MemberKey, MemberKind, State, TargetLanguage,
};
use devgen::resolve;

use crate::helpers::fixtures::{CPP_AXIS, motor_over_axis};

#[test]
fn override_keeps_ancestor_position_and_local_content() {
    let iface = resolve(&motor_over_axis(TargetLanguage::NativeCompiled)).unwrap();
    let names: Vec<_> = iface.attributes.keys().map(|n| n.as_str()).collect();
    assert_eq!(names, ["Position", "Velocity", "Current"]);

    let position = &iface.attributes["Position"];
    assert_eq!(position.member.data_type, DataType::Long);
    assert_eq!(position.origin, "Motor");
    assert!(position.is_local());
    assert_eq!(position.overrides.as_deref(), Some("Axis"));

    let velocity = &iface.attributes["Velocity"];
    assert!(velocity.inherited);
    assert_eq!(velocity.origin, "Axis");

    assert_eq!(iface.parent.as_deref(), Some("Axis"));
    assert_eq!(iface.lineage, ["Axis"]);
    assert_eq!(
        iface
            .warnings
            .iter()
            .filter(|w| w.kind == WarningKind::HiddenByOverride)
            .count(),
        1
    );
}

#[test]
fn states_and_constraints_are_inherited() {
    let mut motor = ClassDescription::new("Motor", TargetLanguage::NativeCompiled).unwrap();
    motor.add_ancestor(CPP_AXIS.clone()).unwrap();
    motor.add_state(State::new("MOVING", "")).unwrap();
    let iface = resolve(&motor).unwrap();
    let states: Vec<_> = iface.states.keys().map(|s| s.as_str()).collect();
    assert_eq!(states, ["ON", "FAULT", "MOVING"]);
    assert_eq!(
        iface.denied_states(MemberKind::Command, "Stop"),
        ["FAULT", "MOVING"]
    );
    // Inherited members get no local zones.
    assert_eq!(iface.local_commands().count(), 0);
}

#[test]
fn three_level_chain_root_first() {
    let mut mid = ClassDescription::new("Motor", TargetLanguage::NativeCompiled).unwrap();
    mid.add_ancestor(CPP_AXIS.clone()).unwrap();
    mid.add_command(Command::new("Home")).unwrap();
    let mut leaf = ClassDescription::new("StepperMotor", TargetLanguage::NativeCompiled).unwrap();
    leaf.inherit_from(Arc::new(mid)).unwrap();
    leaf.add_command(Command::new("Microstep")).unwrap();

    let iface = resolve(&leaf).unwrap();
    let commands: Vec<_> = iface.commands.keys().map(|n| n.as_str()).collect();
    assert_eq!(commands, ["Stop", "Home", "Microstep"]);
    assert_eq!(iface.lineage, ["Axis", "Motor"]);
    assert_eq!(iface.parent.as_deref(), Some("Motor"));
    assert!(iface.warnings.is_empty());
}

#[test]
fn chain_attached_with_add_ancestor_keeps_root_members() {
    let mut root = ClassDescription::new("Root", TargetLanguage::ManagedVm).unwrap();
    root.add_attribute(Attribute::new("RootAttr", DataType::Long))
        .unwrap();
    let mut mid = ClassDescription::new("Mid", TargetLanguage::ManagedVm).unwrap();
    mid.add_ancestor(Arc::new(root)).unwrap();
    mid.add_attribute(Attribute::new("MidAttr", DataType::Long))
        .unwrap();
    let mut leaf = ClassDescription::new("Leaf", TargetLanguage::ManagedVm).unwrap();
    leaf.add_ancestor(Arc::new(mid)).unwrap();

    let iface = resolve(&leaf).unwrap();
    let names: Vec<_> = iface.attributes.keys().map(|n| n.as_str()).collect();
    assert_eq!(names, ["RootAttr", "MidAttr"]);
    assert_eq!(iface.attributes["RootAttr"].origin, "Root");
    assert_eq!(iface.lineage, ["Root", "Mid"]);
}

#[test]
fn duplicate_in_ancestor_names_that_ancestor() {
    let mut broken = ClassDescription::new("Axis", TargetLanguage::ScriptedStandard).unwrap();
    broken
        .add_attribute(Attribute::new("Position", DataType::Double))
        .unwrap();
    // Bypass the editing guard to model a corrupted description.
    broken
        .attributes
        .push(Attribute::new("Position", DataType::Long));
    let mut motor = ClassDescription::new("Motor", TargetLanguage::ScriptedStandard).unwrap();
    motor.add_ancestor(Arc::new(broken)).unwrap();

    match resolve(&motor).unwrap_err() {
        ModelError::DuplicateLocalMember { class, kind, name } => {
            assert_eq!(class, "Axis");
            assert_eq!(kind, MemberKind::Attribute);
            assert_eq!(name, "Position");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn stale_constraint_on_removed_state() {
    let mut class = ClassDescription::new("Valve", TargetLanguage::ManagedVm).unwrap();
    class.add_state(State::new("OPEN", "")).unwrap();
    class.add_state(State::new("CLOSED", "")).unwrap();
    class.add_command(Command::new("Close")).unwrap();
    class
        .set_allowed_states(MemberKey::command("Close"), ["OPEN", "CLOSED"])
        .unwrap();
    // Drop the state without touching the constraint.
    class.state_machine.states.retain(|s| s.name != "CLOSED");

    let iface = resolve(&class).unwrap();
    assert_eq!(
        iface.allowed_states(MemberKind::Command, "Close").unwrap(),
        ["OPEN"]
    );
    assert_eq!(iface.warnings.len(), 1);
    assert_eq!(iface.warnings[0].kind, WarningKind::StaleStateConstraint);
}

#[test]
fn constraint_on_only_removed_states_is_lifted() {
    let mut class = ClassDescription::new("Valve", TargetLanguage::ManagedVm).unwrap();
    class.add_state(State::new("OPEN", "")).unwrap();
    class.add_state(State::new("CLOSED", "")).unwrap();
    class.add_command(Command::new("Close")).unwrap();
    class
        .set_allowed_states(MemberKey::command("Close"), ["CLOSED"])
        .unwrap();
    class.state_machine.states.retain(|s| s.name != "CLOSED");

    let iface = resolve(&class).unwrap();
    assert!(iface.allowed_states(MemberKind::Command, "Close").is_none());
    assert!(iface.denied_states(MemberKind::Command, "Close").is_empty());
    assert_eq!(iface.warnings[0].kind, WarningKind::StaleStateConstraint);
}
