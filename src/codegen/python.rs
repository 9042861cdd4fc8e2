//! Classic Python emitter: a `<Class>.py` module with the device
//! implementation, its `DeviceClass` descriptor and a `main()`.

use super::common::{EmitContext, dimensions};
use super::skeleton::SourceSkeleton;
use super::types::python_default;
use super::writer::SkeletonWriter;
use super::zone::{ClassRole, MemberRole, ZoneId};
use crate::base::string_literal;
use crate::model::{AttrFormat, Attribute, Command, DataType, MemberKind, Pipe, PipeWriteType};

pub(crate) fn emit(ctx: &EmitContext<'_>) -> Vec<SourceSkeleton> {
    let name = ctx.name();
    let file = format!("{name}.py");
    let mut w = ctx.writer(file.as_str());
    w.line("#!/usr/bin/env python");
    w.line("# -*- coding:utf-8 -*-");
    w.blank();
    ctx.banner(&mut w, &file, "#");

    docstring(ctx, &mut w);
    w.line(&format!("__all__ = [\"{name}\", \"{name}Class\", \"main\"]"));
    w.blank();
    w.line("__docformat__ = 'restructuredtext'");
    w.blank();
    w.line("import PyTango");
    w.line("import sys");
    if let Some(parent) = ctx.parent() {
        w.line(&format!("from {parent} import {parent}, {parent}Class"));
    }
    w.zone(ZoneId::class(ClassRole::Includes), "# Add your own imports");
    w.blank();
    w.blank();

    device(ctx, &mut w);
    w.blank();
    device_class(ctx, &mut w);
    w.blank();
    entry_point(ctx, &mut w);
    vec![w.finish()]
}

fn docstring(ctx: &EmitContext<'_>, w: &mut SkeletonWriter) {
    w.line("\"\"\"");
    w.line(&ctx.title().replace("\"\"\"", "'''"));
    for line in ctx.class.metadata.description.lines() {
        w.line(&line.replace("\"\"\"", "'''"));
    }
    w.line("\"\"\"");
    w.blank();
}

fn superclass(ctx: &EmitContext<'_>) -> String {
    match ctx.parent() {
        Some(parent) => parent.to_string(),
        None => "PyTango.Device_4Impl".to_string(),
    }
}

fn denied_list(ctx: &EmitContext<'_>, kind: MemberKind, member: &str) -> Option<String> {
    let denied = ctx.iface.denied_states(kind, member);
    if denied.is_empty() {
        return None;
    }
    let states: Vec<String> = denied
        .iter()
        .map(|s| format!("PyTango.DevState.{s}"))
        .collect();
    Some(states.join(", "))
}

// ============================================================================
// DEVICE
// ============================================================================

fn device(ctx: &EmitContext<'_>, w: &mut SkeletonWriter) {
    let name = ctx.name();
    let parent = superclass(ctx);
    w.line(&format!("class {name}({parent}):"));
    w.indent();
    w.line("\"\"\"");
    for line in ctx.interface_summary() {
        w.line(&line);
    }
    w.line("\"\"\"");
    w.zone(ZoneId::class(ClassRole::Members), "");
    w.blank();

    w.line("def __init__(self, cl, name):");
    w.indent();
    w.line(&format!("{parent}.__init__(self, cl, name)"));
    w.line("self.debug_stream(\"In __init__()\")");
    w.line(&format!("{name}.init_device(self)"));
    w.dedent();
    w.blank();

    w.line("def delete_device(self):");
    w.indent();
    w.line("self.debug_stream(\"In delete_device()\")");
    w.zone(ZoneId::class(ClassRole::DeleteDevice), "");
    w.dedent();
    w.blank();

    w.line("def init_device(self):");
    w.indent();
    w.line("self.debug_stream(\"In init_device()\")");
    if let Some(parent) = ctx.parent() {
        w.line(&format!("{parent}.init_device(self)"));
    }
    w.line("self.get_device_properties(self.get_device_class())");
    for attr in ctx.iface.local_attributes() {
        if attr.write_type.is_readable() {
            w.line(&format!(
                "self.attr_{}_read = {}",
                attr.name,
                python_default(attr.data_type, dimensions(attr))
            ));
        }
    }
    w.zone(ZoneId::class(ClassRole::InitDevice), "");
    w.dedent();
    w.blank();

    w.line("def always_executed_hook(self):");
    w.indent();
    w.line("self.debug_stream(\"In always_executed_hook()\")");
    w.zone(ZoneId::class(ClassRole::AlwaysExecutedHook), "");
    w.dedent();
    w.blank();

    w.line("# -------------------------------------------------------------------------");
    w.line(&format!("#    {name} read/write attribute methods"));
    w.line("# -------------------------------------------------------------------------");
    w.blank();
    for attr in ctx.iface.local_attributes() {
        attribute_methods(ctx, w, attr);
    }
    for pipe in ctx.iface.local_pipes() {
        pipe_methods(ctx, w, pipe);
    }

    w.line("# -------------------------------------------------------------------------");
    w.line(&format!("#    {name} command methods"));
    w.line("# -------------------------------------------------------------------------");
    w.blank();
    for cmd in ctx.iface.local_commands() {
        command_method(ctx, w, cmd);
    }

    w.zone(ZoneId::class(ClassRole::AdditionalMethods), "");
    w.dedent();
}

fn is_allowed(ctx: &EmitContext<'_>, w: &mut SkeletonWriter, kind: MemberKind, member: &str, params: &str) {
    let Some(denied) = denied_list(ctx, kind, member) else {
        return;
    };
    w.line(&format!("def is_{member}_allowed(self{params}):"));
    w.indent();
    w.line(&format!("self.debug_stream(\"In is_{member}_allowed()\")"));
    w.line(&format!("state_ok = not(self.get_state() in [{denied}])"));
    w.zone(ZoneId::member(kind, member, MemberRole::IsAllowed), "");
    w.line("return state_ok");
    w.dedent();
    w.blank();
}

fn attribute_methods(ctx: &EmitContext<'_>, w: &mut SkeletonWriter, attr: &Attribute) {
    let attr_name = &attr.name;
    if attr.write_type.is_readable() {
        w.line(&format!("def read_{attr_name}(self, attr):"));
        w.indent();
        w.line(&format!("self.debug_stream(\"In read_{attr_name}()\")"));
        w.zone(
            ZoneId::member(MemberKind::Attribute, attr_name, MemberRole::Read),
            &format!("attr.set_value(self.attr_{attr_name}_read)"),
        );
        w.dedent();
        w.blank();
    }
    if attr.write_type.is_writable() {
        w.line(&format!("def write_{attr_name}(self, attr):"));
        w.indent();
        w.line(&format!("self.debug_stream(\"In write_{attr_name}()\")"));
        w.line("data = attr.get_write_value()");
        w.line("self.info_stream(\"Attribute value = \" + str(data))");
        w.zone(
            ZoneId::member(MemberKind::Attribute, attr_name, MemberRole::Write),
            "",
        );
        w.dedent();
        w.blank();
    }
    is_allowed(ctx, w, MemberKind::Attribute, attr_name, ", attr");
}

fn pipe_methods(ctx: &EmitContext<'_>, w: &mut SkeletonWriter, pipe: &Pipe) {
    let pipe_name = &pipe.name;
    w.line(&format!("def read_{pipe_name}(self, pipe):"));
    w.indent();
    w.line(&format!("self.debug_stream(\"In read_{pipe_name}()\")"));
    w.zone(
        ZoneId::member(MemberKind::Pipe, pipe_name, MemberRole::Read),
        &format!("pipe.set_value(('{pipe_name}', dict()))"),
    );
    w.dedent();
    w.blank();
    if pipe.write_type == PipeWriteType::ReadWrite {
        w.line(&format!("def write_{pipe_name}(self, pipe):"));
        w.indent();
        w.line(&format!("self.debug_stream(\"In write_{pipe_name}()\")"));
        w.line("data = pipe.get_value()");
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
    let cmd_name = &cmd.name;
    let params = if cmd.argin.data_type == DataType::Void { "" } else { ", argin" };
    w.line(&format!("def {cmd_name}(self{params}):"));
    w.indent();
    if !cmd.description.is_empty() {
        w.line(&format!("\"\"\" {} \"\"\"", cmd.description.replace("\"\"\"", "'''")));
    }
    w.line(&format!("self.debug_stream(\"In {cmd_name}()\")"));
    let returns = cmd.argout.data_type != DataType::Void;
    if returns {
        w.line(&format!("argout = {}", python_default(cmd.argout.data_type, 0)));
    }
    w.zone(
        ZoneId::member(MemberKind::Command, cmd_name, MemberRole::Execute),
        "",
    );
    if returns {
        w.line("return argout");
    }
    w.dedent();
    w.blank();
    is_allowed(ctx, w, MemberKind::Command, cmd_name, "");
}

// ============================================================================
// DEVICE CLASS
// ============================================================================

fn device_class(ctx: &EmitContext<'_>, w: &mut SkeletonWriter) {
    let name = ctx.name();
    let parent = match ctx.parent() {
        Some(parent) => format!("{parent}Class"),
        None => "PyTango.DeviceClass".to_string(),
    };
    w.line(&format!("class {name}Class({parent}):"));
    w.indent();

    for (label, kind) in [
        ("class_property_list", MemberKind::ClassProperty),
        ("device_property_list", MemberKind::DeviceProperty),
    ] {
        w.line(&format!("{label} = {{"));
        w.indent();
        for (k, resolved) in ctx.iface.properties() {
            if k != kind {
                continue;
            }
            let prop = &resolved.member;
            let defaults: Vec<String> = prop.default_values.iter().map(|v| string_literal(v)).collect();
            w.line(&format!(
                "'{}': [PyTango.{}, {}, [{}]],",
                prop.name,
                prop.data_type,
                string_literal(&prop.description),
                defaults.join(", ")
            ));
        }
        w.dedent();
        w.line("}");
        w.blank();
    }

    w.line("cmd_list = {");
    w.indent();
    for resolved in ctx.iface.commands.values() {
        let cmd = &resolved.member;
        w.line(&format!(
            "'{}': [[PyTango.{}, {}], [PyTango.{}, {}]],",
            cmd.name,
            cmd.argin.data_type,
            string_literal(&cmd.argin.description),
            cmd.argout.data_type,
            string_literal(&cmd.argout.description)
        ));
    }
    w.dedent();
    w.line("}");
    w.blank();

    w.line("attr_list = {");
    w.indent();
    for resolved in ctx.iface.attributes.values() {
        let attr = &resolved.member;
        let mut shape = format!(
            "PyTango.{}, PyTango.{}, PyTango.{}",
            attr.data_type,
            attr.format.as_str(),
            attr.write_type.as_str()
        );
        match attr.format {
            AttrFormat::Scalar => {}
            AttrFormat::Spectrum => shape.push_str(&format!(", {}", attr.max_x)),
            AttrFormat::Image => shape.push_str(&format!(", {}, {}", attr.max_x, attr.max_y)),
        }
        let mut props = Vec::new();
        if !attr.description.is_empty() {
            props.push(format!("'description': {}", string_literal(&attr.description)));
        }
        if !attr.enum_labels.is_empty() {
            let labels: Vec<String> = attr.enum_labels.iter().map(|l| string_literal(l)).collect();
            props.push(format!("'enum_labels': [{}]", labels.join(", ")));
        }
        if attr.memorized {
            props.push("'Memorized': \"true\"".to_string());
        }
        if props.is_empty() {
            w.line(&format!("'{}': [[{shape}]],", attr.name));
        } else {
            w.line(&format!("'{}': [[{shape}], {{{}}}],", attr.name, props.join(", ")));
        }
    }
    w.dedent();
    w.line("}");
    w.dedent();
}

fn entry_point(ctx: &EmitContext<'_>, w: &mut SkeletonWriter) {
    let name = ctx.name();
    w.line("def main():");
    w.indent();
    w.line("try:");
    w.indent();
    w.line("py = PyTango.Util(sys.argv)");
    w.line(&format!("py.add_class({name}Class, {name}, '{name}')"));
    w.line("U = PyTango.Util.instance()");
    w.line("U.server_init()");
    w.line("U.server_run()");
    w.dedent();
    w.line("except PyTango.DevFailed as e:");
    w.indent();
    w.line("print('-------> Received a DevFailed exception:', e)");
    w.dedent();
    w.line("except Exception as e:");
    w.indent();
    w.line("print('-------> An unforeseen exception occurred....', e)");
    w.dedent();
    w.dedent();
    w.blank();
    w.line("if __name__ == '__main__':");
    w.indent();
    w.line("main()");
    w.dedent();
}
