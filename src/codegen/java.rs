//! Java emitter: one annotated `<Class>.java` per class.
//!
//! State constraints become `@StateMachine(deniedStates = ...)` annotations,
//! so this target has no `is-allowed` zones.

use smol_str::SmolStr;

use super::common::{EmitContext, dimensions};
use super::skeleton::SourceSkeleton;
use super::types::{java_attr_type, java_default, java_type};
use super::writer::SkeletonWriter;
use super::zone::{ClassRole, MemberRole, ZoneId};
use crate::base::{escape_comment, string_literal};
use crate::model::{Attribute, Command, DataType, MemberKind, Pipe, PipeWriteType, Property};

pub(crate) fn emit(ctx: &EmitContext<'_>) -> Vec<SourceSkeleton> {
    let name = ctx.name();
    let file = format!("{name}.java");
    let mut w = ctx.writer(file.as_str());
    ctx.banner(&mut w, &file, "//");

    w.line(&format!("package org.tango.{};", name.to_ascii_lowercase()));
    w.blank();
    w.line("import fr.esrf.Tango.DevFailed;");
    w.line("import fr.esrf.Tango.DevState;");
    w.line("import org.tango.DeviceState;");
    w.line("import org.tango.server.InvocationContext;");
    w.line("import org.tango.server.ServerManager;");
    w.line("import org.tango.server.annotation.*;");
    w.line("import org.tango.server.pipe.PipeValue;");
    w.zone(ZoneId::class(ClassRole::Includes), "");
    w.blank();

    w.line("/**");
    w.line(&format!(" *  {name} class description:"));
    for line in ctx.class.metadata.description.lines() {
        let text = format!(" *    {}", escape_comment(line));
        w.line(text.trim_end());
    }
    w.line(" *");
    for line in ctx.interface_summary() {
        w.line(&format!(" *  {line}"));
    }
    w.line(" */");
    w.line("@Device");
    match ctx.parent() {
        Some(parent) => w.line(&format!("public class {name} extends {parent} {{")),
        None => w.line(&format!("public class {name} {{")),
    }
    w.indent();
    w.blank();
    w.zone(
        ZoneId::class(ClassRole::Members),
        "//\tAdd your own data members",
    );
    w.blank();

    if ctx.parent().is_none() {
        w.line("@State");
        w.line("private DevState state = DevState.UNKNOWN;");
        w.blank();
    }

    for (kind, resolved) in ctx.iface.properties() {
        if resolved.is_local() {
            property(&mut w, kind, &resolved.member);
        }
    }
    for attr in ctx.iface.local_attributes() {
        attribute(ctx, &mut w, attr);
    }
    for pipe in ctx.iface.local_pipes() {
        pipe_accessors(ctx, &mut w, pipe);
    }
    for cmd in ctx.iface.local_commands() {
        command(ctx, &mut w, cmd);
    }

    lifecycle(&mut w, ClassRole::InitDevice, "@Init", "public void initDevice() throws DevFailed {", "//\tInitialize device");
    lifecycle(&mut w, ClassRole::DeleteDevice, "@Delete", "public void deleteDevice() throws DevFailed {", "//\tRelease resources");
    lifecycle(
        &mut w,
        ClassRole::AlwaysExecutedHook,
        "@AroundInvoke",
        "public void aroundInvoke(final InvocationContext ctx) throws DevFailed {",
        "//\tcode always executed before all requests",
    );

    w.zone(ZoneId::class(ClassRole::AdditionalMethods), "");
    w.blank();
    w.line("public static void main(final String[] args) {");
    w.indent();
    w.line(&format!("ServerManager.getInstance().start(args, {name}.class);"));
    w.dedent();
    w.line("}");
    w.dedent();
    w.line("}");
    vec![w.finish()]
}

/// `Position` -> `position`
fn field(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// `position` -> `Position`
fn accessor(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn denied_annotation(ctx: &EmitContext<'_>, kind: MemberKind, name: &SmolStr) -> Option<String> {
    let denied = ctx.iface.denied_states(kind, name);
    if denied.is_empty() {
        return None;
    }
    let states: Vec<String> = denied.iter().map(|s| format!("DeviceState.{s}")).collect();
    Some(format!("@StateMachine(deniedStates = {{{}}})", states.join(", ")))
}

fn lifecycle(w: &mut SkeletonWriter, role: ClassRole, annotation: &str, signature: &str, default: &str) {
    w.line(annotation);
    w.line(signature);
    w.indent();
    w.zone(ZoneId::class(role), default);
    w.dedent();
    w.line("}");
    w.blank();
}

fn property(w: &mut SkeletonWriter, kind: MemberKind, prop: &Property) {
    let annotation = match kind {
        MemberKind::ClassProperty => "ClassProperty",
        _ => "DeviceProperty",
    };
    let mut args = vec![
        format!("name = {}", string_literal(&prop.name)),
        format!("description = {}", string_literal(&prop.description)),
    ];
    if !prop.default_values.is_empty() {
        let values: Vec<String> = prop.default_values.iter().map(|v| string_literal(v)).collect();
        args.push(format!("defaultValue = {{{}}}", values.join(", ")));
    }
    if prop.mandatory {
        args.push("isMandatory = true".into());
    }
    let field_name = field(&prop.name);
    let type_name = java_type(prop.data_type);
    w.line(&format!("@{annotation}({})", args.join(", ")));
    w.line(&format!("private {type_name} {field_name};"));
    w.line(&format!(
        "public void set{}(final {type_name} {field_name}) {{",
        accessor(&prop.name)
    ));
    w.indent();
    w.line(&format!("this.{field_name} = {field_name};"));
    w.dedent();
    w.line("}");
    w.blank();
}

fn attribute(ctx: &EmitContext<'_>, w: &mut SkeletonWriter, attr: &Attribute) {
    let dims = dimensions(attr);
    let type_name = java_attr_type(attr.data_type, dims);
    let field_name = field(&attr.name);
    let acc = accessor(&attr.name);

    let mut args = vec![format!("name = {}", string_literal(&attr.name))];
    if attr.memorized {
        args.push("isMemorized = true".into());
    }
    if let Some(period) = attr.polling_period {
        args.push(format!("pollingPeriod = {period}"));
    }
    if dims > 0 {
        args.push(format!("maxDimX = {}", attr.max_x));
    }
    if dims > 1 {
        args.push(format!("maxDimY = {}", attr.max_y));
    }
    w.line(&format!("@Attribute({})", args.join(", ")));
    if !attr.description.is_empty() || attr.data_type == DataType::Enum {
        let mut props = vec![format!("description = {}", string_literal(&attr.description))];
        if attr.data_type == DataType::Enum {
            let labels: Vec<String> = attr.enum_labels.iter().map(|l| string_literal(l)).collect();
            props.push(format!("enumLabels = {{{}}}", labels.join(", ")));
        }
        w.line(&format!("@AttributeProperties({})", props.join(", ")));
    }
    if let Some(annotation) = denied_annotation(ctx, MemberKind::Attribute, &attr.name) {
        w.line(&annotation);
    }
    w.line(&format!(
        "private {type_name} {field_name} = {};",
        java_default(attr.data_type, dims)
    ));
    w.blank();

    if attr.write_type.is_readable() {
        w.line(&format!("public {type_name} get{acc}() throws DevFailed {{"));
        w.indent();
        w.zone(
            ZoneId::member(MemberKind::Attribute, &attr.name, MemberRole::Read),
            "",
        );
        w.line(&format!("return {field_name};"));
        w.dedent();
        w.line("}");
        w.blank();
    }
    if attr.write_type.is_writable() {
        w.line(&format!(
            "public void set{acc}(final {type_name} {field_name}) throws DevFailed {{"
        ));
        w.indent();
        w.zone(
            ZoneId::member(MemberKind::Attribute, &attr.name, MemberRole::Write),
            &format!("this.{field_name} = {field_name};"),
        );
        w.dedent();
        w.line("}");
        w.blank();
    }
}

fn pipe_accessors(ctx: &EmitContext<'_>, w: &mut SkeletonWriter, pipe: &Pipe) {
    let field_name = field(&pipe.name);
    let acc = accessor(&pipe.name);
    w.line(&format!("@Pipe(name = {})", string_literal(&pipe.name)));
    if let Some(annotation) = denied_annotation(ctx, MemberKind::Pipe, &pipe.name) {
        w.line(&annotation);
    }
    w.line(&format!("private PipeValue {field_name};"));
    w.blank();
    w.line(&format!("public PipeValue get{acc}() throws DevFailed {{"));
    w.indent();
    w.zone(ZoneId::member(MemberKind::Pipe, &pipe.name, MemberRole::Read), "");
    w.line(&format!("return {field_name};"));
    w.dedent();
    w.line("}");
    w.blank();
    if pipe.write_type == PipeWriteType::ReadWrite {
        w.line(&format!(
            "public void set{acc}(final PipeValue {field_name}) throws DevFailed {{"
        ));
        w.indent();
        w.zone(
            ZoneId::member(MemberKind::Pipe, &pipe.name, MemberRole::Write),
            &format!("this.{field_name} = {field_name};"),
        );
        w.dedent();
        w.line("}");
        w.blank();
    }
}

fn command(ctx: &EmitContext<'_>, w: &mut SkeletonWriter, cmd: &Command) {
    let argin = cmd.argin.data_type;
    let argout = cmd.argout.data_type;
    w.line(&format!(
        "@Command(name = {}, inTypeDesc = {}, outTypeDesc = {})",
        string_literal(&cmd.name),
        string_literal(&cmd.argin.description),
        string_literal(&cmd.argout.description)
    ));
    if let Some(period) = cmd.polling_period {
        w.line(&format!("@Polled(period = {period})"));
    }
    if let Some(annotation) = denied_annotation(ctx, MemberKind::Command, &cmd.name) {
        w.line(&annotation);
    }
    let params = match argin {
        DataType::Void => String::new(),
        t => format!("final {} argin", java_type(t)),
    };
    w.line(&format!(
        "public {} {}({params}) throws DevFailed {{",
        java_type(argout),
        field(&cmd.name)
    ));
    w.indent();
    if argout != DataType::Void {
        w.line(&format!("{} argout = {};", java_type(argout), java_default(argout, 0)));
    }
    w.zone(
        ZoneId::member(MemberKind::Command, &cmd.name, MemberRole::Execute),
        "",
    );
    if argout != DataType::Void {
        w.line("return argout;");
    }
    w.dedent();
    w.line("}");
    w.blank();
}
