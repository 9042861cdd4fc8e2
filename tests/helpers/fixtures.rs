//! Class descriptions used across the integration tests.

use std::sync::Arc;

use once_cell::sync::Lazy;

use devgen::model::{
    AttrFormat, AttrWriteType, Attribute, ClassDescription, Command, DataType, MemberKey, Pipe,
    Property, State, TargetLanguage,
};

/// A C++ base class shared by the inheritance tests.
pub static CPP_AXIS: Lazy<Arc<ClassDescription>> =
    Lazy::new(|| Arc::new(axis(TargetLanguage::NativeCompiled)));

/// Root class: `Axis` with `Position`, `Velocity` and `Stop`.
pub fn axis(language: TargetLanguage) -> ClassDescription {
    let mut class = ClassDescription::new("Axis", language).unwrap();
    class.metadata.title = "Generic axis".into();
    class.add_state(State::new("ON", "powered")).unwrap();
    class.add_state(State::new("FAULT", "")).unwrap();
    class
        .add_attribute(
            Attribute::new("Position", DataType::Double).with_write_type(AttrWriteType::ReadWrite),
        )
        .unwrap();
    class
        .add_attribute(Attribute::new("Velocity", DataType::Double))
        .unwrap();
    class.add_command(Command::new("Stop")).unwrap();
    class
        .set_allowed_states(MemberKey::command("Stop"), ["ON"])
        .unwrap();
    class
}

/// A thermometer-like class exercising every member kind.
pub fn gauge(language: TargetLanguage) -> ClassDescription {
    let mut class = ClassDescription::new("Gauge", language).unwrap();
    class.metadata.description = "Reads a pressure and a temperature.".into();
    class.add_state(State::new("ON", "")).unwrap();
    class.add_state(State::new("ALARM", "")).unwrap();
    class
        .add_attribute(
            Attribute::new("Temperature", DataType::Double)
                .with_write_type(AttrWriteType::ReadWrite)
                .with_description("Sensor temperature"),
        )
        .unwrap();
    class
        .add_attribute(Attribute::new("Pressure", DataType::Float))
        .unwrap();
    class
        .add_attribute(
            Attribute::new("History", DataType::Double).with_format(AttrFormat::Spectrum, 128, 0),
        )
        .unwrap();
    class
        .add_command(Command::new("Calibrate").with_argin(DataType::Double, "offset"))
        .unwrap();
    class
        .add_command(Command::new("Status").with_argout(DataType::String, "status text"))
        .unwrap();
    class
        .add_device_property(Property::new("SerialLine", DataType::String).mandatory())
        .unwrap();
    class
        .add_class_property(Property::new("Vendor", DataType::String).with_default(["Acme"]))
        .unwrap();
    class.add_pipe(Pipe::new("Snapshot")).unwrap();
    class
        .set_allowed_states(MemberKey::command("Calibrate"), ["ON"])
        .unwrap();
    class
}

/// `Axis` followed by a derived `Motor` that overrides `Position`.
pub fn motor_over_axis(language: TargetLanguage) -> ClassDescription {
    let mut motor = ClassDescription::new("Motor", language).unwrap();
    motor.add_ancestor(Arc::new(axis(language))).unwrap();
    motor
        .add_attribute(
            Attribute::new("Position", DataType::Long)
                .with_write_type(AttrWriteType::ReadWrite)
                .as_override(),
        )
        .unwrap();
    motor
        .add_attribute(Attribute::new("Current", DataType::Double))
        .unwrap();
    motor.add_command(Command::new("Home")).unwrap();
    motor
}
