//! Pieces shared by the language emitters: file banners, member summaries
//! and the per-request emission context.

use smol_str::SmolStr;

use super::writer::SkeletonWriter;
use super::zone::MarkerStyle;
use crate::base::escape_comment;
use crate::config::GeneratorConfig;
use crate::model::{AttrFormat, Attribute, ClassDescription, License, MemberKind};
use crate::resolve::EffectiveInterface;

/// Everything an emitter reads for one class.
pub(crate) struct EmitContext<'a> {
    pub iface: &'a EffectiveInterface,
    pub class: &'a ClassDescription,
    pub config: &'a GeneratorConfig,
    pub style: MarkerStyle,
}

impl<'a> EmitContext<'a> {
    pub fn new(
        iface: &'a EffectiveInterface,
        class: &'a ClassDescription,
        config: &'a GeneratorConfig,
        style: MarkerStyle,
    ) -> Self {
        Self {
            iface,
            class,
            config,
            style,
        }
    }

    pub fn name(&self) -> &SmolStr {
        &self.iface.class_name
    }

    pub fn parent(&self) -> Option<&SmolStr> {
        self.iface.parent.as_ref()
    }

    pub fn writer(&self, file_name: impl Into<String>) -> SkeletonWriter {
        SkeletonWriter::new(file_name, self.style, self.config.indent_unit())
    }

    /// Copyright line, falling back to the configured default.
    pub fn copyright(&self) -> Option<&str> {
        let own = self.class.metadata.copyright.trim();
        if !own.is_empty() {
            return Some(own);
        }
        self.config.default_copyright.as_deref()
    }

    /// Comment-safe title, or the class name when untitled.
    pub fn title(&self) -> String {
        let title = self.class.metadata.title.trim();
        if title.is_empty() {
            self.name().to_string()
        } else {
            escape_comment(title)
        }
    }

    /// Write the file banner if enabled. `prefix` starts every comment line.
    pub fn banner(&self, w: &mut SkeletonWriter, file_name: &str, prefix: &str) {
        if !self.config.emit_banner {
            return;
        }
        let rule = format!("{prefix}{}", "=".repeat(77));
        w.line(&rule);
        w.line(&format!("{prefix} file :        {file_name}"));
        w.line(prefix.trim_end());
        w.line(&format!("{prefix} description : {}", self.title()));
        for line in self.class.metadata.description.lines() {
            let text = format!("{prefix}               {}", escape_comment(line));
            w.line(text.trim_end());
        }
        w.line(prefix.trim_end());
        w.line(&format!("{prefix} project :     {}", self.title()));
        w.line(prefix.trim_end());
        for line in license_text(self.class.metadata.license, self.name()) {
            w.line(&format!("{prefix} {line}"));
        }
        if let Some(copyright) = self.copyright() {
            w.line(prefix.trim_end());
            w.line(&format!("{prefix} Copyright (C): {}", escape_comment(copyright)));
        }
        w.line(&rule);
        w.line(&format!(
            "{prefix}          This file is generated by devgen (schema {})",
            self.class
                .schema_revision
                .as_deref()
                .unwrap_or(crate::model::CURRENT_SCHEMA_REVISION)
        ));
        w.line(&rule);
        w.blank();
    }

    /// Summary lines of the effective interface, inherited members included.
    pub fn interface_summary(&self) -> Vec<String> {
        let iface = self.iface;
        let mut out = Vec::new();
        for kind in MemberKind::ALL {
            let names = iface.names(kind);
            if names.is_empty() {
                continue;
            }
            out.push(format!("{} list:", heading(kind)));
            for name in names {
                let origin = origin_of(iface, kind, name);
                let detail = match kind {
                    MemberKind::Attribute => iface
                        .attributes
                        .get(name.as_str())
                        .map(|a| attribute_shape(&a.member))
                        .unwrap_or_default(),
                    MemberKind::Command => iface
                        .commands
                        .get(name.as_str())
                        .map(|c| format!("{} -> {}", c.member.argin.data_type, c.member.argout.data_type))
                        .unwrap_or_default(),
                    _ => String::new(),
                };
                let mut line = format!("  {name}");
                if !detail.is_empty() {
                    line.push_str(&format!("  {detail}"));
                }
                if let Some(origin) = origin {
                    line.push_str(&format!("  (inherited from {origin})"));
                }
                out.push(line);
            }
        }
        out
    }
}

fn heading(kind: MemberKind) -> &'static str {
    match kind {
        MemberKind::Attribute => "Attribute",
        MemberKind::Command => "Command",
        MemberKind::ClassProperty => "Class property",
        MemberKind::DeviceProperty => "Device property",
        MemberKind::Pipe => "Pipe",
    }
}

fn origin_of<'i>(iface: &'i EffectiveInterface, kind: MemberKind, name: &str) -> Option<&'i SmolStr> {
    let (inherited, origin) = match kind {
        MemberKind::Attribute => iface.attributes.get(name).map(|r| (r.inherited, &r.origin))?,
        MemberKind::Command => iface.commands.get(name).map(|r| (r.inherited, &r.origin))?,
        MemberKind::ClassProperty => iface.class_properties.get(name).map(|r| (r.inherited, &r.origin))?,
        MemberKind::DeviceProperty => iface.device_properties.get(name).map(|r| (r.inherited, &r.origin))?,
        MemberKind::Pipe => iface.pipes.get(name).map(|r| (r.inherited, &r.origin))?,
    };
    inherited.then_some(origin)
}

/// `DevDouble SPECTRUM READ_WRITE (max 16)`
pub(crate) fn attribute_shape(attr: &Attribute) -> String {
    let mut shape = format!(
        "{} {} {}",
        attr.data_type,
        attr.format.as_str(),
        attr.write_type.as_str()
    );
    match attr.format {
        AttrFormat::Scalar => {}
        AttrFormat::Spectrum => shape.push_str(&format!(" (max {})", attr.max_x)),
        AttrFormat::Image => shape.push_str(&format!(" (max {}x{})", attr.max_x, attr.max_y)),
    }
    shape
}

/// Number of array dimensions of an attribute value.
pub(crate) fn dimensions(attr: &Attribute) -> usize {
    match attr.format {
        AttrFormat::Scalar => 0,
        AttrFormat::Spectrum => 1,
        AttrFormat::Image => 2,
    }
}

fn license_text(license: License, class: &str) -> Vec<String> {
    let body: &[&str] = match license {
        License::Gpl => &[
            "is free software: you can redistribute it and/or modify",
            "it under the terms of the GNU General Public License as published by",
            "the Free Software Foundation, either version 3 of the License, or",
            "(at your option) any later version.",
        ],
        License::Lgpl => &[
            "is free software: you can redistribute it and/or modify",
            "it under the terms of the GNU Lesser General Public License as published",
            "by the Free Software Foundation, either version 3 of the License, or",
            "(at your option) any later version.",
        ],
        License::Apache => &[
            "is licensed under the Apache License, Version 2.0.",
            "See http://www.apache.org/licenses/LICENSE-2.0",
        ],
        License::Mit => &["is distributed under the terms of the MIT License."],
        License::None => return Vec::new(),
    };
    body.iter()
        .enumerate()
        .map(|(i, line)| if i == 0 { format!("{class} {line}") } else { (*line).to_string() })
        .collect()
}
