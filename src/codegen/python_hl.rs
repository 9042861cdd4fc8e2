//! High-level Python emitter: a declarative `tango.server` module.

use super::common::{EmitContext, dimensions};
use super::skeleton::SourceSkeleton;
use super::types::python_default;
use super::writer::SkeletonWriter;
use super::zone::{ClassRole, MemberRole, ZoneId};
use crate::base::string_literal;
use crate::model::{
    AttrWriteType, Attribute, Command, DataType, MemberKind, Pipe, PipeWriteType, Property,
};

pub(crate) fn emit(ctx: &EmitContext<'_>) -> Vec<SourceSkeleton> {
    let name = ctx.name();
    let file = format!("{name}.py");
    let mut w = ctx.writer(file.as_str());
    w.line("#!/usr/bin/env python");
    w.line("# -*- coding:utf-8 -*-");
    w.blank();
    ctx.banner(&mut w, &file, "#");

    w.line("\"\"\"");
    w.line(&ctx.title().replace("\"\"\"", "'''"));
    for line in ctx.class.metadata.description.lines() {
        w.line(&line.replace("\"\"\"", "'''"));
    }
    w.line("\"\"\"");
    w.blank();
    w.line("import tango");
    w.line("from tango import DebugIt, DevState, AttrWriteType, PipeWriteType");
    w.line("from tango.server import run, Device, attribute, command, pipe");
    w.line("from tango.server import device_property, class_property");
    if let Some(parent) = ctx.parent() {
        w.line(&format!("from {parent} import {parent}"));
    }
    w.zone(ZoneId::class(ClassRole::Includes), "# Add your own imports");
    w.blank();
    w.line(&format!("__all__ = [\"{name}\", \"main\"]"));
    w.blank();
    w.blank();

    let parent = ctx
        .parent()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "Device".to_string());
    w.line(&format!("class {name}({parent}):"));
    w.indent();
    w.line("\"\"\"");
    for line in ctx.interface_summary() {
        w.line(&line);
    }
    w.line("\"\"\"");
    w.zone(ZoneId::class(ClassRole::Members), "");
    w.blank();

    declarations(ctx, &mut w);
    lifecycle(ctx, &mut w, &parent);

    for attr in ctx.iface.local_attributes() {
        attribute_methods(ctx, &mut w, attr);
    }
    for pipe in ctx.iface.local_pipes() {
        pipe_methods(ctx, &mut w, pipe);
    }
    for cmd in ctx.iface.local_commands() {
        command_method(ctx, &mut w, cmd);
    }

    w.zone(ZoneId::class(ClassRole::AdditionalMethods), "");
    w.dedent();
    w.blank();
    w.blank();
    w.line("def main(args=None, **kwargs):");
    w.indent();
    w.line(&format!("\"\"\"Main function of the {name} module.\"\"\""));
    w.line(&format!("return run(({name},), args=args, **kwargs)"));
    w.dedent();
    w.blank();
    w.blank();
    w.line("if __name__ == '__main__':");
    w.indent();
    w.line("main()");
    w.dedent();
    vec![w.finish()]
}

/// `'DevDouble'`, `('DevDouble',)` or `(('DevDouble',),)` by dimension.
fn dtype(data_type: DataType, dims: usize) -> String {
    let mut dtype = format!("'{data_type}'");
    for _ in 0..dims {
        dtype = format!("({dtype},)");
    }
    dtype
}

fn field(attr_name: &str) -> String {
    let mut chars = attr_name.chars();
    match chars.next() {
        Some(first) => format!("_{}{}", first.to_ascii_lowercase(), chars.as_str()),
        None => String::new(),
    }
}

fn declarations(ctx: &EmitContext<'_>, w: &mut SkeletonWriter) {
    let props: Vec<_> = ctx.iface.properties().filter(|(_, p)| p.is_local()).collect();
    if !props.is_empty() {
        w.line("# -----------------");
        w.line("# Device Properties");
        w.line("# -----------------");
        w.blank();
        for (kind, resolved) in props {
            property(w, kind, &resolved.member);
        }
    }

    let attrs: Vec<_> = ctx.iface.local_attributes().collect();
    if !attrs.is_empty() {
        w.line("# ----------");
        w.line("# Attributes");
        w.line("# ----------");
        w.blank();
        for attr in attrs {
            attribute(w, attr);
        }
    }

    let pipes: Vec<_> = ctx.iface.local_pipes().collect();
    if !pipes.is_empty() {
        w.line("# -----");
        w.line("# Pipes");
        w.line("# -----");
        w.blank();
        for p in pipes {
            let access = match p.write_type {
                PipeWriteType::Read => "",
                PipeWriteType::ReadWrite => ", access=PipeWriteType.PIPE_READ_WRITE",
            };
            w.line(&format!(
                "{} = pipe(doc={}{access})",
                p.name,
                string_literal(&p.description)
            ));
            w.blank();
        }
    }
}

fn property(w: &mut SkeletonWriter, kind: MemberKind, prop: &Property) {
    let factory = match kind {
        MemberKind::ClassProperty => "class_property",
        _ => "device_property",
    };
    let mut args = vec![format!("dtype='{}'", prop.data_type)];
    if !prop.description.is_empty() {
        args.push(format!("doc={}", string_literal(&prop.description)));
    }
    match prop.default_values.as_slice() {
        [] => {}
        [single] if !prop.data_type.is_array() => {
            args.push(format!("default_value={}", string_literal(single)));
        }
        many => {
            let values: Vec<String> = many.iter().map(|v| string_literal(v)).collect();
            args.push(format!("default_value=[{}]", values.join(", ")));
        }
    }
    if prop.mandatory {
        args.push("mandatory=True".into());
    }
    w.line(&format!("{} = {factory}(", prop.name));
    w.indent();
    w.line(&args.join(", "));
    w.dedent();
    w.line(")");
    w.blank();
}

fn attribute(w: &mut SkeletonWriter, attr: &Attribute) {
    let dims = dimensions(attr);
    let mut args = vec![format!("dtype={}", dtype(attr.data_type, dims))];
    if attr.write_type != AttrWriteType::Read {
        args.push(format!("access=AttrWriteType.{}", attr.write_type.as_str()));
    }
    if dims > 0 {
        args.push(format!("max_dim_x={}", attr.max_x));
    }
    if dims > 1 {
        args.push(format!("max_dim_y={}", attr.max_y));
    }
    if !attr.enum_labels.is_empty() {
        let labels: Vec<String> = attr.enum_labels.iter().map(|l| string_literal(l)).collect();
        args.push(format!("enum_labels=[{}]", labels.join(", ")));
    }
    if attr.memorized {
        args.push("memorized=True".into());
    }
    if let Some(period) = attr.polling_period {
        args.push(format!("polling_period={period}"));
    }
    if !attr.description.is_empty() {
        args.push(format!("doc={}", string_literal(&attr.description)));
    }
    w.line(&format!("{} = attribute(", attr.name));
    w.indent();
    for (i, arg) in args.iter().enumerate() {
        let sep = if i + 1 == args.len() { "" } else { "," };
        w.line(&format!("{arg}{sep}"));
    }
    w.dedent();
    w.line(")");
    w.blank();
}

fn lifecycle(ctx: &EmitContext<'_>, w: &mut SkeletonWriter, parent: &str) {
    let name = ctx.name();
    w.line("# ---------------");
    w.line("# General methods");
    w.line("# ---------------");
    w.blank();
    w.line("def init_device(self):");
    w.indent();
    w.line(&format!("\"\"\"Initializes the attributes and properties of the {name}.\"\"\""));
    w.line(&format!("{parent}.init_device(self)"));
    for attr in ctx.iface.local_attributes() {
        w.line(&format!(
            "self.{} = {}",
            field(&attr.name),
            python_default(attr.data_type, dimensions(attr))
        ));
    }
    w.zone(ZoneId::class(ClassRole::InitDevice), "");
    w.dedent();
    w.blank();

    w.line("def always_executed_hook(self):");
    w.indent();
    w.line("\"\"\"Method always executed before any TANGO command is executed.\"\"\"");
    w.zone(ZoneId::class(ClassRole::AlwaysExecutedHook), "");
    w.dedent();
    w.blank();

    w.line("def delete_device(self):");
    w.indent();
    w.line("\"\"\"Hook to delete resources allocated in init_device.\"\"\"");
    w.zone(ZoneId::class(ClassRole::DeleteDevice), "");
    w.dedent();
    w.blank();
}

fn is_allowed(ctx: &EmitContext<'_>, w: &mut SkeletonWriter, kind: MemberKind, member: &str, params: &str) {
    let denied = ctx.iface.denied_states(kind, member);
    if denied.is_empty() {
        return;
    }
    let states: Vec<String> = denied.iter().map(|s| format!("DevState.{s}")).collect();
    w.line(&format!("def is_{member}_allowed(self{params}):"));
    w.indent();
    w.line(&format!("state_ok = self.get_state() not in [{}]", states.join(", ")));
    w.zone(ZoneId::member(kind, member, MemberRole::IsAllowed), "");
    w.line("return state_ok");
    w.dedent();
    w.blank();
}

fn attribute_methods(ctx: &EmitContext<'_>, w: &mut SkeletonWriter, attr: &Attribute) {
    let attr_name = &attr.name;
    let field = field(attr_name);
    if attr.write_type.is_readable() {
        w.line(&format!("def read_{attr_name}(self):"));
        w.indent();
        w.line(&format!("\"\"\"Return the {attr_name} attribute.\"\"\""));
        w.zone(
            ZoneId::member(MemberKind::Attribute, attr_name, MemberRole::Read),
            &format!("return self.{field}"),
        );
        w.dedent();
        w.blank();
    }
    if attr.write_type.is_writable() {
        w.line(&format!("def write_{attr_name}(self, value):"));
        w.indent();
        w.line(&format!("\"\"\"Set the {attr_name} attribute.\"\"\""));
        w.zone(
            ZoneId::member(MemberKind::Attribute, attr_name, MemberRole::Write),
            &format!("self.{field} = value"),
        );
        w.dedent();
        w.blank();
    }
    is_allowed(ctx, w, MemberKind::Attribute, attr_name, ", attr");
}

fn pipe_methods(ctx: &EmitContext<'_>, w: &mut SkeletonWriter, p: &Pipe) {
    let pipe_name = &p.name;
    w.line(&format!("def read_{pipe_name}(self):"));
    w.indent();
    w.line(&format!("\"\"\"Return the {pipe_name} pipe blob.\"\"\""));
    w.zone(
        ZoneId::member(MemberKind::Pipe, pipe_name, MemberRole::Read),
        &format!("return ('{pipe_name}', dict())"),
    );
    w.dedent();
    w.blank();
    if p.write_type == PipeWriteType::ReadWrite {
        w.line(&format!("def write_{pipe_name}(self, value):"));
        w.indent();
        w.line(&format!("\"\"\"Set the {pipe_name} pipe blob.\"\"\""));
        w.zone(
            ZoneId::member(MemberKind::Pipe, pipe_name, MemberRole::Write),
            "",
        );
        w.dedent();
        w.blank();
    }
    is_allowed(ctx, w, MemberKind::Pipe, pipe_name, ", req_type");
}

fn command_method(ctx: &EmitContext<'_>, w: &mut SkeletonWriter, cmd: &Command) {
    let mut args = Vec::new();
    if cmd.argin.data_type != DataType::Void {
        args.push(format!("dtype_in='{}'", cmd.argin.data_type));
        args.push(format!("doc_in={}", string_literal(&cmd.argin.description)));
    }
    if cmd.argout.data_type != DataType::Void {
        args.push(format!("dtype_out='{}'", cmd.argout.data_type));
        args.push(format!("doc_out={}", string_literal(&cmd.argout.description)));
    }
    if let Some(period) = cmd.polling_period {
        args.push(format!("polling_period={period}"));
    }
    w.line(&format!("@command({})", args.join(", ")));
    w.line("@DebugIt()");
    let params = if cmd.argin.data_type == DataType::Void { "" } else { ", argin" };
    w.line(&format!("def {}(self{params}):", cmd.name));
    w.indent();
    let doc = if cmd.description.is_empty() {
        format!("Execute the {} command.", cmd.name)
    } else {
        cmd.description.replace("\"\"\"", "'''")
    };
    w.line(&format!("\"\"\"{doc}\"\"\""));
    let default = match cmd.argout.data_type {
        DataType::Void => String::new(),
        t => format!("return {}", python_default(t, 0)),
    };
    w.zone(
        ZoneId::member(MemberKind::Command, &cmd.name, MemberRole::Execute),
        &default,
    );
    w.dedent();
    w.blank();
    is_allowed(ctx, w, MemberKind::Command, &cmd.name, "");
}
