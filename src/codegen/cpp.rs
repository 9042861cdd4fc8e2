//! C++ emitter: `<Class>.h`, `<Class>.cpp` and `<Class>StateMachine.cpp`.

use super::common::{EmitContext, dimensions};
use super::skeleton::SourceSkeleton;
use super::types::{cpp_argin, cpp_argout, cpp_type};
use super::writer::SkeletonWriter;
use super::zone::{ClassRole, MemberRole, ZoneId};
use crate::base::{escape_comment, snake_case};
use crate::model::{AttrFormat, Attribute, Command, DataType, MemberKind, Pipe, PipeWriteType};

pub(crate) fn emit(ctx: &EmitContext<'_>) -> Vec<SourceSkeleton> {
    vec![header(ctx), implementation(ctx), state_machine(ctx)]
}

fn base_class(ctx: &EmitContext<'_>) -> String {
    match ctx.parent() {
        Some(parent) => format!("{parent}_ns::{parent}"),
        None => "TANGO_BASE_CLASS".to_string(),
    }
}

fn method_rule(w: &mut SkeletonWriter, name: &str, description: &str) {
    w.line("//--------------------------------------------------------");
    w.line("/**");
    w.line(&format!(" *\tMethod      : {name}"));
    w.line(&format!(" *\tDescription : {}", escape_comment(description)));
    w.line(" */");
    w.line("//--------------------------------------------------------");
}

fn debug_entry(w: &mut SkeletonWriter, what: &str) {
    w.line(&format!(
        "DEBUG_STREAM << \"{what} entering... \" << std::endl;"
    ));
}

// ============================================================================
// HEADER
// ============================================================================

fn header(ctx: &EmitContext<'_>) -> SourceSkeleton {
    let name = ctx.name();
    let file = format!("{name}.h");
    let mut w = ctx.writer(file.as_str());
    ctx.banner(&mut w, &file, "//");

    w.line(&format!("#ifndef {name}_H"));
    w.line(&format!("#define {name}_H"));
    w.blank();
    w.line("#include <tango/tango.h>");
    if let Some(parent) = ctx.parent() {
        w.line(&format!("#include <{parent}.h>"));
    }
    w.blank();
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
    w.blank();

    w.line(&format!("namespace {name}_ns"));
    w.line("{");
    w.blank();
    w.line(&format!("class {name} : public {}", base_class(ctx)));
    w.line("{");
    w.blank();
    w.line("public:");
    w.indent();
    w.zone(
        ZoneId::class(ClassRole::Members),
        "//\tAdd your own data members",
    );

    let device_props: Vec<_> = ctx
        .iface
        .device_properties
        .values()
        .filter(|p| p.is_local())
        .map(|p| &p.member)
        .collect();
    if !device_props.is_empty() {
        w.blank();
        w.line("//\tDevice property data members");
        for prop in device_props {
            w.line(&format!("{}\t{};", property_cpp_type(prop.data_type), field_name(&prop.name)));
        }
    }

    let readable: Vec<_> = ctx
        .iface
        .local_attributes()
        .filter(|a| a.write_type.is_readable())
        .collect();
    if !readable.is_empty() {
        w.blank();
        w.line("//\tAttribute data members");
        for attr in &readable {
            w.line(&format!("{}\t*attr_{}_read;", cpp_type(attr.data_type), attr.name));
        }
    }

    w.blank();
    w.line(&format!("{name}(Tango::DeviceClass *cl, std::string &s);"));
    w.line(&format!("~{name}() {{ delete_device(); }}"));
    w.blank();
    w.line("void delete_device();");
    w.line("virtual void init_device();");
    w.line("void get_device_property();");
    w.line("virtual void always_executed_hook();");
    w.line("virtual void read_attr_hardware(std::vector<long> &attr_list);");

    let attrs: Vec<_> = ctx.iface.local_attributes().collect();
    if !attrs.is_empty() {
        w.blank();
        w.line("//\tAttribute methods");
        for attr in attrs {
            if attr.write_type.is_readable() {
                w.line(&format!("virtual void read_{}(Tango::Attribute &attr);", attr.name));
            }
            if attr.write_type.is_writable() {
                w.line(&format!("virtual void write_{}(Tango::WAttribute &attr);", attr.name));
            }
            w.line(&format!("virtual bool is_{}_allowed(Tango::AttReqType type);", attr.name));
        }
    }

    let pipes: Vec<_> = ctx.iface.local_pipes().collect();
    if !pipes.is_empty() {
        w.blank();
        w.line("//\tPipe methods");
        for pipe in pipes {
            w.line(&format!("virtual void read_{}(Tango::Pipe &pipe);", pipe.name));
            if pipe.write_type == PipeWriteType::ReadWrite {
                w.line(&format!("virtual void write_{}(Tango::WPipe &pipe);", pipe.name));
            }
            w.line(&format!("virtual bool is_{}_allowed(Tango::PipeReqType type);", pipe.name));
        }
    }

    let commands: Vec<_> = ctx.iface.local_commands().collect();
    if !commands.is_empty() {
        w.blank();
        w.line("//\tCommand related methods");
        for cmd in commands {
            w.line(&format!(
                "virtual {} {}({});",
                cpp_argout(cmd.argout.data_type),
                snake_case(&cmd.name),
                cpp_argin(cmd.argin.data_type)
            ));
            w.line(&format!("virtual bool is_{}_allowed(const CORBA::Any &any);", cmd.name));
        }
    }

    w.blank();
    w.zone(ZoneId::class(ClassRole::AdditionalMethods), "");
    w.dedent();
    w.line("};");
    w.blank();
    w.line("}\t//\tEnd of namespace");
    w.blank();
    w.line(&format!("#endif   //\t{name}_H"));
    w.finish()
}

fn field_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn property_cpp_type(data_type: DataType) -> String {
    match data_type {
        DataType::String => "std::string".to_string(),
        DataType::VarStringArray => "std::vector<std::string>".to_string(),
        DataType::VarShortArray => "std::vector<Tango::DevShort>".to_string(),
        DataType::VarLongArray => "std::vector<Tango::DevLong>".to_string(),
        DataType::VarDoubleArray => "std::vector<Tango::DevDouble>".to_string(),
        DataType::VarBooleanArray => "std::vector<Tango::DevBoolean>".to_string(),
        other => cpp_type(other),
    }
}

// ============================================================================
// IMPLEMENTATION
// ============================================================================

fn implementation(ctx: &EmitContext<'_>) -> SourceSkeleton {
    let name = ctx.name();
    let file = format!("{name}.cpp");
    let mut w = ctx.writer(file.as_str());
    ctx.banner(&mut w, &file, "//");

    w.line(&format!("#include <{name}.h>"));
    w.blank();
    w.line(&format!("namespace {name}_ns"));
    w.line("{");

    let base = base_class(ctx);
    let derived = ctx.parent().is_some();

    // Constructor
    method_rule(&mut w, &format!("{name}::{name}()"), "Constructor");
    w.line(&format!("{name}::{name}(Tango::DeviceClass *cl, std::string &s)"));
    w.line(&format!(" : {base}(cl, s.c_str())"));
    w.line("{");
    w.indent();
    w.line("init_device();");
    w.dedent();
    w.line("}");
    w.blank();

    let readable: Vec<_> = ctx
        .iface
        .local_attributes()
        .filter(|a| a.write_type.is_readable())
        .collect();

    // delete_device
    method_rule(&mut w, &format!("{name}::delete_device()"), "will be called at device destruction or at init command");
    w.line(&format!("void {name}::delete_device()"));
    w.line("{");
    w.indent();
    debug_entry(&mut w, &format!("{name}::delete_device()"));
    w.zone(
        ZoneId::class(ClassRole::DeleteDevice),
        "//\tDelete device allocated objects",
    );
    for attr in &readable {
        w.line(&format!("delete[] attr_{}_read;", attr.name));
    }
    if derived {
        w.line(&format!("{base}::delete_device();"));
    }
    w.dedent();
    w.line("}");
    w.blank();

    // init_device
    method_rule(&mut w, &format!("{name}::init_device()"), "will be called at device initialization");
    w.line(&format!("void {name}::init_device()"));
    w.line("{");
    w.indent();
    debug_entry(&mut w, &format!("{name}::init_device()"));
    if derived {
        w.line(&format!("{base}::init_device();"));
    }
    w.zone(
        ZoneId::class(ClassRole::InitDevice),
        "//\tInitialization before get_device_property() call",
    );
    w.line("get_device_property();");
    for attr in &readable {
        w.line(&format!(
            "attr_{}_read = new {}[{}];",
            attr.name,
            cpp_type(attr.data_type),
            buffer_len(attr)
        ));
    }
    w.dedent();
    w.line("}");
    w.blank();

    device_property_reader(ctx, &mut w);

    // always_executed_hook
    method_rule(&mut w, &format!("{name}::always_executed_hook()"), "method always executed before any command is executed");
    w.line(&format!("void {name}::always_executed_hook()"));
    w.line("{");
    w.indent();
    debug_entry(&mut w, &format!("{name}::always_executed_hook()"));
    w.zone(
        ZoneId::class(ClassRole::AlwaysExecutedHook),
        "//\tcode always executed before all requests",
    );
    w.dedent();
    w.line("}");
    w.blank();

    method_rule(&mut w, &format!("{name}::read_attr_hardware()"), "Hardware acquisition for attributes");
    w.line(&format!(
        "void {name}::read_attr_hardware(TANGO_UNUSED(std::vector<long> &attr_list))"
    ));
    w.line("{");
    w.indent();
    debug_entry(&mut w, &format!("{name}::read_attr_hardware()"));
    w.dedent();
    w.line("}");
    w.blank();

    for attr in ctx.iface.local_attributes() {
        attribute_methods(ctx, &mut w, attr);
    }
    for pipe in ctx.iface.local_pipes() {
        pipe_methods(ctx, &mut w, pipe);
    }
    for cmd in ctx.iface.local_commands() {
        command_method(ctx, &mut w, cmd);
    }

    method_rule(&mut w, &format!("{name}::additional_methods()"), "Additional methods");
    w.zone(
        ZoneId::class(ClassRole::AdditionalMethods),
        "//\tAdditional Methods",
    );
    w.line(&format!("}} //\tnamespace {name}_ns"));
    w.finish()
}

fn buffer_len(attr: &Attribute) -> u64 {
    let x = u64::from(attr.max_x.max(1));
    let y = u64::from(attr.max_y.max(1));
    match attr.format {
        AttrFormat::Scalar => 1,
        AttrFormat::Spectrum => x,
        AttrFormat::Image => x * y,
    }
}

fn device_property_reader(ctx: &EmitContext<'_>, w: &mut SkeletonWriter) {
    let name = ctx.name();
    let props: Vec<_> = ctx
        .iface
        .device_properties
        .values()
        .filter(|p| p.is_local())
        .map(|p| &p.member)
        .collect();

    method_rule(w, &format!("{name}::get_device_property()"), "Read database to initialize property data members.");
    w.line(&format!("void {name}::get_device_property()"));
    w.line("{");
    w.indent();
    if !props.is_empty() {
        w.line("Tango::DbData\tdev_prop;");
        for prop in &props {
            w.line(&format!("dev_prop.push_back(Tango::DbDatum(\"{}\"));", prop.name));
        }
        w.line("if (Tango::Util::instance()->_UseDb)");
        w.indent();
        w.line("get_db_device()->get_property(dev_prop);");
        w.dedent();
        for (i, prop) in props.iter().enumerate() {
            w.line(&format!(
                "if (!dev_prop[{i}].is_empty()) dev_prop[{i}] >> {};",
                field_name(&prop.name)
            ));
            if prop.mandatory {
                w.line(&format!(
                    "else Tango::Except::throw_exception(\"PROPERTY_NOT_SET\", \"{} is mandatory\", \"{name}::get_device_property()\");",
                    prop.name
                ));
            }
        }
    }
    w.dedent();
    w.line("}");
    w.blank();
}

fn attribute_methods(ctx: &EmitContext<'_>, w: &mut SkeletonWriter, attr: &Attribute) {
    let class = ctx.name();
    let attr_name = &attr.name;
    let type_name = cpp_type(attr.data_type);

    if attr.write_type.is_readable() {
        method_rule(
            w,
            &format!("{class}::read_{attr_name}"),
            &format!("Extract real attribute values for {attr_name} acquisition result."),
        );
        w.line(&format!("void {class}::read_{attr_name}(Tango::Attribute &attr)"));
        w.line("{");
        w.indent();
        debug_entry(w, &format!("{class}::read_{attr_name}(Tango::Attribute &attr)"));
        let set_value = match attr.format {
            AttrFormat::Scalar => format!("attr.set_value(attr_{attr_name}_read);"),
            AttrFormat::Spectrum => format!("attr.set_value(attr_{attr_name}_read, {});", attr.max_x),
            AttrFormat::Image => format!(
                "attr.set_value(attr_{attr_name}_read, {}, {});",
                attr.max_x, attr.max_y
            ),
        };
        w.zone(
            ZoneId::member(MemberKind::Attribute, attr_name, MemberRole::Read),
            &format!("//\tSet the attribute value\n{set_value}"),
        );
        w.dedent();
        w.line("}");
        w.blank();
    }

    if attr.write_type.is_writable() {
        method_rule(
            w,
            &format!("{class}::write_{attr_name}"),
            &format!("Set new value for {attr_name} attribute."),
        );
        w.line(&format!("void {class}::write_{attr_name}(Tango::WAttribute &attr)"));
        w.line("{");
        w.indent();
        debug_entry(w, &format!("{class}::write_{attr_name}(Tango::WAttribute &attr)"));
        w.line("//\tRetrieve write value");
        if dimensions(attr) == 0 {
            w.line(&format!("{type_name}\tw_val;"));
        } else {
            w.line(&format!("const {type_name}\t*w_val;"));
        }
        w.line("attr.get_write_value(w_val);");
        w.zone(
            ZoneId::member(MemberKind::Attribute, attr_name, MemberRole::Write),
            "",
        );
        w.dedent();
        w.line("}");
        w.blank();
    }
}

fn pipe_methods(ctx: &EmitContext<'_>, w: &mut SkeletonWriter, pipe: &Pipe) {
    let class = ctx.name();
    let pipe_name = &pipe.name;

    method_rule(w, &format!("{class}::read_{pipe_name}"), &pipe.description);
    w.line(&format!("void {class}::read_{pipe_name}(Tango::Pipe &pipe)"));
    w.line("{");
    w.indent();
    debug_entry(w, &format!("{class}::read_{pipe_name}(Tango::Pipe &pipe)"));
    w.zone(
        ZoneId::member(MemberKind::Pipe, pipe_name, MemberRole::Read),
        "//\tSet the pipe blob",
    );
    w.dedent();
    w.line("}");
    w.blank();

    if pipe.write_type == PipeWriteType::ReadWrite {
        method_rule(w, &format!("{class}::write_{pipe_name}"), &pipe.description);
        w.line(&format!("void {class}::write_{pipe_name}(Tango::WPipe &pipe)"));
        w.line("{");
        w.indent();
        debug_entry(w, &format!("{class}::write_{pipe_name}(Tango::WPipe &pipe)"));
        w.zone(
            ZoneId::member(MemberKind::Pipe, pipe_name, MemberRole::Write),
            "",
        );
        w.dedent();
        w.line("}");
        w.blank();
    }
}

fn command_method(ctx: &EmitContext<'_>, w: &mut SkeletonWriter, cmd: &Command) {
    let class = ctx.name();
    let method = snake_case(&cmd.name);
    let argout = cmd.argout.data_type;

    method_rule(w, &format!("{class}::{method}()"), &cmd.description);
    w.line(&format!(
        "{} {class}::{method}({})",
        cpp_argout(argout),
        cpp_argin(cmd.argin.data_type)
    ));
    w.line("{");
    w.indent();
    if argout.is_array() {
        w.line(&format!("{} *argout = new {};", cpp_type(argout), cpp_type(argout)));
    } else if argout != DataType::Void {
        w.line(&format!("{}\targout;", cpp_type(argout)));
    }
    w.line(&format!(
        "DEBUG_STREAM << \"{class}::{}()  - \" << device_name << std::endl;",
        cmd.name
    ));
    w.zone(
        ZoneId::member(MemberKind::Command, &cmd.name, MemberRole::Execute),
        "//\tAdd your own code",
    );
    if argout != DataType::Void {
        w.line("return argout;");
    }
    w.dedent();
    w.line("}");
    w.blank();
}

// ============================================================================
// STATE MACHINE
// ============================================================================

fn state_machine(ctx: &EmitContext<'_>) -> SourceSkeleton {
    let name = ctx.name();
    let file = format!("{name}StateMachine.cpp");
    let mut w = ctx.writer(file.as_str());
    ctx.banner(&mut w, &file, "//");

    w.line(&format!("#include <{name}.h>"));
    w.blank();
    w.line(&format!("namespace {name}_ns"));
    w.line("{");
    w.line("//=================================================");
    w.line("//\t\tAttributes Allowed Methods");
    w.line("//=================================================");
    w.blank();
    for attr in ctx.iface.local_attributes() {
        is_allowed(
            ctx,
            &mut w,
            MemberKind::Attribute,
            &attr.name,
            "TANGO_UNUSED(Tango::AttReqType type)",
        );
    }

    let pipes: Vec<_> = ctx.iface.local_pipes().collect();
    if !pipes.is_empty() {
        w.line("//=================================================");
        w.line("//\t\tPipe Allowed Methods");
        w.line("//=================================================");
        w.blank();
        for pipe in pipes {
            is_allowed(
                ctx,
                &mut w,
                MemberKind::Pipe,
                &pipe.name,
                "TANGO_UNUSED(Tango::PipeReqType type)",
            );
        }
    }

    w.line("//=================================================");
    w.line("//\t\tCommands Allowed Methods");
    w.line("//=================================================");
    w.blank();
    for cmd in ctx.iface.local_commands() {
        is_allowed(
            ctx,
            &mut w,
            MemberKind::Command,
            &cmd.name,
            "TANGO_UNUSED(const CORBA::Any &any)",
        );
    }
    w.line(&format!("}}\t//\tEnd of namespace {name}_ns"));
    w.finish()
}

fn is_allowed(
    ctx: &EmitContext<'_>,
    w: &mut SkeletonWriter,
    kind: MemberKind,
    member: &str,
    params: &str,
) {
    let class = ctx.name();
    let denied = ctx.iface.denied_states(kind, member);
    let zone = ZoneId::member(kind, member, MemberRole::IsAllowed);

    w.line("//--------------------------------------------------------");
    w.line("/**");
    w.line(&format!(" *\tMethod      : {class}::is_{member}_allowed()"));
    w.line(&format!(" *\tDescription : Execution allowed for {member} {kind}."));
    w.line(" */");
    w.line("//--------------------------------------------------------");
    w.line(&format!("bool {class}::is_{member}_allowed({params})"));
    w.line("{");
    w.indent();
    if denied.is_empty() {
        w.line(&format!("//\tNot any excluded states for {member} {kind}."));
        w.zone(zone, "");
    } else {
        w.line("//\tCompare device state with not allowed states.");
        let last = denied.len() - 1;
        for (i, state) in denied.iter().enumerate() {
            let open = if i == 0 { "if (" } else { "    " };
            let close = if i == last { ")" } else { " ||" };
            w.line(&format!("{open}get_state()==Tango::{state}{close}"));
        }
        w.line("{");
        w.indent();
        w.zone(zone, "");
        w.line("return false;");
        w.dedent();
        w.line("}");
    }
    w.line("return true;");
    w.dedent();
    w.line("}");
    w.blank();
}
