//! Detection and upgrade of legacy class descriptions.

use smol_str::SmolStr;

use super::fragments::{RecoveredFragments, extract};
use super::raw::{LegacyDescription, RawRecord, RawValue};
use crate::codegen::{MemberRole, ZoneId};
use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostic, DiagnosticCollector, WarningKind};
use crate::error::LegacyError;
use crate::model::{
    AttrFormat, AttrWriteType, Attribute, ClassDescription, Command, DataType, License,
    MemberKey, MemberKind, Property, State, TargetLanguage,
};

/// Schema major version from which descriptions are current.
const FIRST_CURRENT_MAJOR: u32 = 7;

const REVISION_KEY: &str = "pogoRevision";

const KNOWN_KEYS: &[&str] = &[
    REVISION_KEY,
    "class_name",
    "language",
    "title",
    "description",
    "copyright",
    "license",
    "abstract",
    "states",
    "attributes",
    "commands",
    "class_properties",
    "device_properties",
];

/// Result of upgrading a legacy description.
#[derive(Clone, Debug)]
pub struct LegacyConversion {
    pub class: ClassDescription,
    pub fragments: RecoveredFragments,
    pub warnings: Vec<Diagnostic>,
}

/// Whether `record` was written by a legacy tool version: the revision tag
/// is missing, is not `major.minor`, or has a major below 7.
pub fn detect(record: &RawRecord) -> bool {
    let Some(revision) = record.get(REVISION_KEY) else {
        return true;
    };
    let text = match revision {
        RawValue::Text(text) => text.clone(),
        RawValue::Number(n) => n.to_string(),
        _ => return true,
    };
    match parse_revision(&text) {
        Some((major, _)) => major < FIRST_CURRENT_MAJOR,
        None => true,
    }
}

fn parse_revision(text: &str) -> Option<(u32, u32)> {
    let (major, minor) = text.trim().split_once('.').unwrap_or((text.trim(), "0"));
    Some((major.parse().ok()?, minor.parse().ok()?))
}

/// Upgrade a legacy description to the current model.
///
/// Only a missing class name is fatal. Everything else that cannot be
/// mapped is reported as a `LegacyConversionIncomplete` warning and
/// skipped or given a fallback.
pub fn upgrade(
    desc: &LegacyDescription,
    config: &GeneratorConfig,
) -> Result<LegacyConversion, LegacyError> {
    let record = &desc.record;
    if !detect(record) {
        let revision = record
            .get(REVISION_KEY)
            .and_then(RawValue::as_text)
            .unwrap_or_default();
        return Err(LegacyError::NotLegacy(revision.to_string()));
    }

    let mut conv = Converter {
        warnings: DiagnosticCollector::new(),
    };

    let name = text(record, "class_name").ok_or(LegacyError::MissingClassName)?;
    let language = conv.language(record);
    let mut class =
        ClassDescription::new(&name, language).map_err(|_| LegacyError::MissingClassName)?;

    for key in record.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            conv.warn(format!("unknown field '{key}' ignored"));
        }
    }

    class.metadata.title = text(record, "title").unwrap_or_default();
    class.metadata.description = text(record, "description").unwrap_or_default();
    class.metadata.copyright = text(record, "copyright").unwrap_or_default();
    if let Some(label) = text(record, "license") {
        match License::from_name(&label) {
            Some(license) => class.metadata.license = license,
            None => conv.warn(format!("unknown license '{label}', using {}", License::default())),
        }
    }
    class.is_abstract = record
        .get("abstract")
        .and_then(RawValue::as_bool)
        .unwrap_or(false);

    conv.states(record, &mut class);
    let mut constraints: Vec<(MemberKey, Vec<String>)> = Vec::new();
    for item in records(record, "attributes") {
        if let Some(key) = conv.attribute(item, &mut class) {
            constraints.extend(allowed(item).map(|states| (key, states)));
        }
    }
    for item in records(record, "commands") {
        if let Some(key) = conv.command(item, &mut class) {
            constraints.extend(allowed(item).map(|states| (key, states)));
        }
    }
    for item in records(record, "class_properties") {
        conv.property(item, MemberKind::ClassProperty, &mut class);
    }
    for item in records(record, "device_properties") {
        conv.property(item, MemberKind::DeviceProperty, &mut class);
    }
    for (key, states) in constraints {
        conv.constraint(&mut class, key, states);
    }

    let fragments = if class.is_abstract || !config.recover_legacy_code {
        RecoveredFragments::new()
    } else {
        conv.fragments(desc, &class)
    };

    tracing::debug!(
        "upgraded legacy class {} ({} fragment(s) recovered)",
        class.name,
        fragments.len()
    );
    Ok(LegacyConversion {
        class,
        fragments,
        warnings: conv.warnings.finish(),
    })
}

// ── Field access ─────────────────────────────────────────────────────

fn text(record: &RawRecord, key: &str) -> Option<String> {
    match record.get(key)? {
        RawValue::Text(text) => Some(text.trim().to_string()),
        RawValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn records<'r>(record: &'r RawRecord, key: &str) -> impl Iterator<Item = &'r RawRecord> {
    record
        .get(key)
        .and_then(RawValue::as_list)
        .unwrap_or_default()
        .iter()
        .filter_map(RawValue::as_record)
}

fn allowed(item: &RawRecord) -> Option<Vec<String>> {
    item.get("allowed_states").map(RawValue::text_items)
}

struct Converter {
    warnings: DiagnosticCollector,
}

impl Converter {
    fn warn(&mut self, message: String) {
        tracing::warn!("legacy conversion: {message}");
        self.warnings.warn(WarningKind::LegacyConversionIncomplete, message);
    }

    fn language(&mut self, record: &RawRecord) -> TargetLanguage {
        let Some(label) = text(record, "language") else {
            return TargetLanguage::default();
        };
        let found = if label == "C++" {
            Some(TargetLanguage::NativeCompiled)
        } else {
            TargetLanguage::from_name(&label)
        };
        found.unwrap_or_else(|| {
            self.warn(format!(
                "unknown language '{label}', using {}",
                TargetLanguage::default()
            ));
            TargetLanguage::default()
        })
    }

    fn data_type(&mut self, item: &RawRecord, key: &str, fallback: DataType, owner: &str) -> DataType {
        let Some(label) = text(item, key) else {
            return fallback;
        };
        DataType::from_label(&label).unwrap_or_else(|| {
            self.warn(format!("{owner}: unknown type '{label}', using {fallback}"));
            fallback
        })
    }

    fn member_name(&mut self, item: &RawRecord, kind: MemberKind) -> Option<String> {
        let name = text(item, "name");
        if name.is_none() {
            self.warn(format!("{kind} without a name skipped"));
        }
        name
    }

    fn states(&mut self, record: &RawRecord, class: &mut ClassDescription) {
        let Some(items) = record.get("states").and_then(RawValue::as_list) else {
            return;
        };
        for item in items {
            let state = match item {
                RawValue::Text(name) => State::new(name.trim(), ""),
                RawValue::Record(fields) => match text(fields, "name") {
                    Some(name) => State::new(name, text(fields, "description").unwrap_or_default()),
                    None => {
                        self.warn("state without a name skipped".into());
                        continue;
                    }
                },
                _ => {
                    self.warn("unreadable state entry skipped".into());
                    continue;
                }
            };
            let name = state.name.clone();
            if let Err(err) = class.add_state(state) {
                self.warn(format!("state '{name}' skipped: {err}"));
            }
        }
    }

    fn attribute(&mut self, item: &RawRecord, class: &mut ClassDescription) -> Option<MemberKey> {
        let name = self.member_name(item, MemberKind::Attribute)?;
        let owner = format!("attribute '{name}'");
        let data_type = self.data_type(item, "data_type", DataType::String, &owner);
        let data_type = if data_type.is_attribute_type() {
            data_type
        } else {
            self.warn(format!("{owner}: type {data_type} cannot be an attribute, using DevString"));
            DataType::String
        };

        let format = match text(item, "format") {
            None => AttrFormat::Scalar,
            Some(label) => AttrFormat::from_name(&label).unwrap_or_else(|| {
                self.warn(format!("{owner}: unknown format '{label}', using SCALAR"));
                AttrFormat::Scalar
            }),
        };
        let write_type = match text(item, "write_type") {
            None => AttrWriteType::Read,
            Some(label) => AttrWriteType::from_name(&label).unwrap_or_else(|| {
                self.warn(format!("{owner}: unknown write type '{label}', using READ"));
                AttrWriteType::Read
            }),
        };
        let max_x = item.get("max_x").and_then(RawValue::as_u32).unwrap_or(1);
        let max_y = item.get("max_y").and_then(RawValue::as_u32).unwrap_or(0);

        let mut attr = Attribute::new(name.as_str(), data_type)
            .with_format(format, max_x, max_y)
            .with_write_type(write_type)
            .with_description(text(item, "description").unwrap_or_default());
        if let Some(labels) = item.get("enum_labels") {
            attr = attr.with_enum_labels(labels.text_items());
        }
        if item.get("memorized").and_then(RawValue::as_bool) == Some(true) {
            attr = attr.memorized();
        }
        if let Some(period) = item.get("polling_period").and_then(RawValue::as_u32) {
            attr = attr.with_polling_period(period);
        }
        match class.add_attribute(attr) {
            Ok(()) => Some(MemberKey::attribute(name)),
            Err(err) => {
                self.warn(format!("{owner} skipped: {err}"));
                None
            }
        }
    }

    fn command(&mut self, item: &RawRecord, class: &mut ClassDescription) -> Option<MemberKey> {
        let name = self.member_name(item, MemberKind::Command)?;
        let owner = format!("command '{name}'");
        let argin = self.data_type(item, "argin_type", DataType::Void, &owner);
        let argout = self.data_type(item, "argout_type", DataType::Void, &owner);
        let mut cmd = Command::new(name.as_str())
            .with_argin(argin, text(item, "argin_description").unwrap_or_else(|| "none".into()))
            .with_argout(argout, text(item, "argout_description").unwrap_or_else(|| "none".into()))
            .with_description(text(item, "description").unwrap_or_default());
        cmd.polling_period = item.get("polling_period").and_then(RawValue::as_u32);
        match class.add_command(cmd) {
            Ok(()) => Some(MemberKey::command(name)),
            Err(err) => {
                self.warn(format!("{owner} skipped: {err}"));
                None
            }
        }
    }

    fn property(&mut self, item: &RawRecord, kind: MemberKind, class: &mut ClassDescription) {
        let Some(name) = self.member_name(item, kind) else {
            return;
        };
        let owner = format!("{kind} '{name}'");
        let data_type = self.data_type(item, "data_type", DataType::String, &owner);
        let data_type = if data_type.is_property_type() {
            data_type
        } else {
            self.warn(format!("{owner}: type {data_type} cannot be a property, using DevString"));
            DataType::String
        };
        let mut prop = Property::new(name.as_str(), data_type)
            .with_description(text(item, "description").unwrap_or_default());
        if let Some(values) = item.get("default_values") {
            prop = prop.with_default(values.text_items());
        }
        if item.get("mandatory").and_then(RawValue::as_bool) == Some(true) {
            prop = prop.mandatory();
        }
        let added = match kind {
            MemberKind::ClassProperty => class.add_class_property(prop),
            _ => class.add_device_property(prop),
        };
        if let Err(err) = added {
            self.warn(format!("{owner} skipped: {err}"));
        }
    }

    fn constraint(&mut self, class: &mut ClassDescription, key: MemberKey, states: Vec<String>) {
        let mut known: Vec<SmolStr> = Vec::with_capacity(states.len());
        for state in states {
            let state = state.trim();
            if class.state_machine.has_state(state) {
                known.push(SmolStr::new(state));
            } else {
                self.warn(format!(
                    "{} '{}': unknown state '{state}' dropped from its allowed states",
                    key.kind, key.name
                ));
            }
        }
        let subject = format!("{} '{}'", key.kind, key.name);
        if let Err(err) = class.set_allowed_states(key, known) {
            self.warn(format!("{subject}: allowed states dropped: {err}"));
        }
    }

    fn fragments(&mut self, desc: &LegacyDescription, class: &ClassDescription) -> RecoveredFragments {
        let mut fragments = RecoveredFragments::new();
        for (file, source) in &desc.sources {
            for found in extract(source) {
                if let Some((kind, member, _)) = found.id.member_parts() {
                    if !class.has_member(kind, member) {
                        self.warn(format!(
                            "{file}: body for unknown {kind} '{member}' not recovered"
                        ));
                        continue;
                    }
                }
                match found.body {
                    Some(body) => fragments.insert(found.id, body),
                    None => self.warn(format!(
                        "{file}: no body found for '{}', a stub is generated",
                        found.id
                    )),
                }
            }
        }
        if !desc.sources.is_empty() {
            self.report_missing(class, &fragments);
        }
        fragments
    }

    /// Warn about members that had an implementation slot but no recovered body.
    fn report_missing(&mut self, class: &ClassDescription, fragments: &RecoveredFragments) {
        let mut expected: Vec<ZoneId> = Vec::new();
        for attr in &class.attributes {
            if attr.write_type.is_readable() {
                expected.push(ZoneId::member(MemberKind::Attribute, &attr.name, MemberRole::Read));
            }
            if attr.write_type.is_writable() {
                expected.push(ZoneId::member(MemberKind::Attribute, &attr.name, MemberRole::Write));
            }
        }
        for cmd in &class.commands {
            expected.push(ZoneId::member(MemberKind::Command, &cmd.name, MemberRole::Execute));
        }
        for id in expected {
            if !fragments.contains(&id) {
                self.warn(format!("no hand-written body recovered for '{id}'"));
            }
        }
    }
}
