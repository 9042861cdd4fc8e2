//! Language-specific structural checks run before any text is emitted.

use crate::error::CodegenError;
use crate::model::{AttrFormat, Attribute, DataType, TargetLanguage};
use crate::resolve::EffectiveInterface;

/// Reject members whose shape the target language cannot express.
pub(crate) fn check_interface(
    iface: &EffectiveInterface,
    language: TargetLanguage,
) -> Result<(), CodegenError> {
    for resolved in iface.attributes.values() {
        check_attribute(&resolved.member, language)?;
    }
    for (kind, resolved) in iface.properties() {
        let prop = &resolved.member;
        if !prop.data_type.is_property_type() {
            return Err(CodegenError::unsupported(
                language,
                format!("{kind} '{}'", prop.name),
                format!("{} cannot be a property type", prop.data_type),
            ));
        }
    }
    Ok(())
}

fn check_attribute(attr: &Attribute, language: TargetLanguage) -> Result<(), CodegenError> {
    let fail = |reason: String| {
        CodegenError::unsupported(language, format!("attribute '{}'", attr.name), reason)
    };

    if !attr.data_type.is_attribute_type() {
        return Err(fail(format!("{} cannot be an attribute type", attr.data_type)));
    }
    let scalar = attr.format == AttrFormat::Scalar;
    match attr.data_type {
        DataType::Enum if attr.enum_labels.is_empty() => {
            Err(fail("enumerated attribute declares no labels".into()))
        }
        DataType::Enum if !scalar && language != TargetLanguage::NativeCompiled => Err(fail(
            format!("{} enumerations are only generated for Cpp", attr.format.as_str()),
        )),
        DataType::Encoded if !scalar => Err(fail("encoded attributes must be scalar".into())),
        _ if element_count(attr) > MAX_ELEMENTS => Err(fail(format!(
            "{}x{} elements exceed the limit of {MAX_ELEMENTS}",
            attr.max_x, attr.max_y
        ))),
        _ => Ok(()),
    }
}

/// Largest value buffer a generated attribute may declare.
const MAX_ELEMENTS: u64 = i32::MAX as u64;

fn element_count(attr: &Attribute) -> u64 {
    let x = u64::from(attr.max_x.max(1));
    match attr.format {
        AttrFormat::Scalar => 1,
        AttrFormat::Spectrum => x,
        AttrFormat::Image => x * u64::from(attr.max_y.max(1)),
    }
}
