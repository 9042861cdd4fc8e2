//! Constructs a target language cannot express.

use rstest::rstest;

use devgen::codegen::CodeEmitter;
use devgen::error::CodegenError;
use devgen::model::{
    AttrFormat, Attribute, ClassDescription, DataType, Property, TargetLanguage,
};
use devgen::{GeneratorConfig, resolve};

fn emit_with(language: TargetLanguage, edit: impl FnOnce(&mut ClassDescription)) -> Result<(), CodegenError> {
    let mut class = ClassDescription::new("Probe", language).unwrap();
    edit(&mut class);
    let iface = resolve(&class).unwrap();
    CodeEmitter::for_language(language)
        .emit(&iface, &class, &GeneratorConfig::default())
        .map(|_| ())
}

fn enum_spectrum() -> Attribute {
    Attribute::new("Modes", DataType::Enum)
        .with_format(AttrFormat::Spectrum, 8, 0)
        .with_enum_labels(["SLOW", "FAST"])
}

#[rstest]
#[case(TargetLanguage::NativeCompiled, true)]
#[case(TargetLanguage::ManagedVm, false)]
#[case(TargetLanguage::ScriptedStandard, false)]
#[case(TargetLanguage::ScriptedHighLevel, false)]
fn non_scalar_enum(#[case] language: TargetLanguage, #[case] supported: bool) {
    let result = emit_with(language, |c| c.add_attribute(enum_spectrum()).unwrap());
    assert_eq!(result.is_ok(), supported, "{language}: {result:?}");
}

#[rstest]
#[case::enum_without_labels(Attribute::new("Mode", DataType::Enum))]
#[case::void_attribute(Attribute::new("Nothing", DataType::Void))]
#[case::array_typed(Attribute::new("Samples", DataType::VarDoubleArray))]
#[case::oversized_image(Attribute::new("Frame", DataType::UShort).with_format(AttrFormat::Image, 70_000, 70_000))]
#[case::encoded_image(Attribute::new("Jpeg", DataType::Encoded).with_format(AttrFormat::Image, 64, 64))]
fn rejected_in_every_language(#[case] attr: Attribute) {
    for language in TargetLanguage::ALL {
        let err = emit_with(language, |c| c.attributes.push(attr.clone())).unwrap_err();
        let CodegenError::UnsupportedConstruct { language: reported, subject, .. } = err;
        assert_eq!(reported, language);
        assert!(subject.contains(attr.name.as_str()), "{subject}");
    }
}

#[rstest]
#[case(DataType::State)]
#[case(DataType::Enum)]
#[case(DataType::Encoded)]
#[case(DataType::Void)]
fn property_types_rejected(#[case] data_type: DataType) {
    let err = emit_with(TargetLanguage::NativeCompiled, |c| {
        c.add_device_property(Property::new("Bad", data_type)).unwrap()
    })
    .unwrap_err();
    assert!(err.to_string().contains("device property 'Bad'"), "{err}");
}

#[test]
fn scalar_enum_with_labels_is_fine_everywhere() {
    for language in TargetLanguage::ALL {
        let attr = Attribute::new("Mode", DataType::Enum).with_enum_labels(["A", "B"]);
        assert!(emit_with(language, |c| c.add_attribute(attr).unwrap()).is_ok(), "{language}");
    }
}
