//! Multi-class server emitter: the executable entry points that register
//! every class of a [`ServerDescription`].

use super::skeleton::SourceSkeleton;
use super::writer::SkeletonWriter;
use super::zone::{MarkerStyle, ServerRole, ZoneId};
use crate::base::escape_comment;
use crate::config::GeneratorConfig;
use crate::error::ModelError;
use crate::model::{ServerDescription, TargetLanguage};

/// Emit the entry-point skeletons of a multi-class server.
///
/// Every class must share the server's language. An empty server yields no
/// files.
pub fn emit_server(
    server: &ServerDescription,
    config: &GeneratorConfig,
) -> Result<Vec<SourceSkeleton>, ModelError> {
    let Some(language) = server.language() else {
        return Ok(Vec::new());
    };
    if let Some(odd) = server.classes.iter().find(|c| c.language != language) {
        return Err(ModelError::LanguageMismatch {
            class: server.name.clone(),
            ancestor: odd.name.clone(),
            expected: language,
            found: odd.language,
        });
    }

    let out = ServerOut {
        server,
        config,
        style: MarkerStyle::for_language(language),
    };
    let skeletons = match language {
        TargetLanguage::NativeCompiled => vec![out.cpp_main(), out.cpp_factory()],
        TargetLanguage::ManagedVm => vec![out.java_main()],
        TargetLanguage::ScriptedStandard => vec![out.python_main()],
        TargetLanguage::ScriptedHighLevel => vec![out.python_hl_main()],
    };
    tracing::debug!(
        "emitted {} server file(s) for {} ({} classes)",
        skeletons.len(),
        server.name,
        server.classes.len()
    );
    Ok(skeletons)
}

struct ServerOut<'a> {
    server: &'a ServerDescription,
    config: &'a GeneratorConfig,
    style: MarkerStyle,
}

impl ServerOut<'_> {
    fn writer(&self, file: &str) -> SkeletonWriter {
        SkeletonWriter::new(file, self.style, self.config.indent_unit())
    }

    fn banner(&self, w: &mut SkeletonWriter, file: &str, prefix: &str) {
        if !self.config.emit_banner {
            return;
        }
        let title = if self.server.title.trim().is_empty() {
            self.server.name.to_string()
        } else {
            escape_comment(self.server.title.trim())
        };
        let rule = format!("{prefix}{}", "=".repeat(77));
        w.line(&rule);
        w.line(&format!("{prefix} file :        {file}"));
        w.line(prefix.trim_end());
        w.line(&format!("{prefix} description : {title}"));
        for line in self.server.description.lines() {
            let text = format!("{prefix}               {}", escape_comment(line));
            w.line(text.trim_end());
        }
        w.line(prefix.trim_end());
        w.line(&format!("{prefix} license :     {}", self.server.license));
        w.line(&rule);
        w.line(&format!("{prefix}          This file is generated by devgen"));
        w.line(&rule);
        w.blank();
    }

    fn class_names(&self) -> impl Iterator<Item = &str> {
        self.server.classes.iter().map(|c| c.name.as_str())
    }

    fn cpp_main(&self) -> SourceSkeleton {
        let file = "main.cpp";
        let mut w = self.writer(file);
        self.banner(&mut w, file, "//");
        w.line("#include <tango.h>");
        w.zone(ZoneId::server(ServerRole::Includes), "");
        w.blank();
        w.line("int main(int argc, char *argv[])");
        w.line("{");
        w.indent();
        w.line("Tango::Util *tg = NULL;");
        w.line("try");
        w.line("{");
        w.indent();
        w.line("tg = Tango::Util::init(argc, argv);");
        w.line("tg->server_init(false);");
        w.line("std::cout << \"Ready to accept request\" << std::endl;");
        w.line("tg->server_run();");
        w.dedent();
        w.line("}");
        w.line("catch (std::bad_alloc &)");
        w.line("{");
        w.indent();
        w.line("std::cout << \"Can't allocate memory to store device object !!!\" << std::endl;");
        w.dedent();
        w.line("}");
        w.line("catch (CORBA::Exception &e)");
        w.line("{");
        w.indent();
        w.line("Tango::Except::print_exception(e);");
        w.dedent();
        w.line("}");
        w.line("if (tg != NULL)");
        w.indent();
        w.line("tg->server_cleanup();");
        w.dedent();
        w.line("return 0;");
        w.dedent();
        w.line("}");
        w.finish()
    }

    fn cpp_factory(&self) -> SourceSkeleton {
        let file = "ClassFactory.cpp";
        let mut w = self.writer(file);
        self.banner(&mut w, file, "//");
        w.line("#include <tango.h>");
        for class in self.class_names() {
            w.line(&format!("#include <{class}Class.h>"));
        }
        w.zone(ZoneId::server(ServerRole::Includes), "");
        w.blank();
        w.line("void Tango::DServer::class_factory()");
        w.line("{");
        w.indent();
        for class in self.class_names() {
            let ns = format!("{class}_ns");
            w.line(&format!(
                "add_class({ns}::{class}Class::init(\"{class}\"));"
            ));
        }
        w.zone(ZoneId::server(ServerRole::AdditionalClasses), "");
        w.dedent();
        w.line("}");
        w.finish()
    }

    fn java_main(&self) -> SourceSkeleton {
        let name = &self.server.name;
        let file = format!("{name}.java");
        let mut w = self.writer(&file);
        self.banner(&mut w, &file, "//");
        w.line(&format!("package org.tango.{};", name.to_ascii_lowercase()));
        w.blank();
        w.line("import org.tango.server.ServerManager;");
        for class in self.class_names() {
            w.line(&format!(
                "import org.tango.{}.{class};",
                class.to_ascii_lowercase()
            ));
        }
        w.zone(ZoneId::server(ServerRole::Includes), "");
        w.blank();
        w.line(&format!("public class {name} {{"));
        w.indent();
        w.line("public static void main(final String[] args) {");
        w.indent();
        w.line("ServerManager manager = ServerManager.getInstance();");
        for class in self.class_names() {
            w.line(&format!("manager.addClass(\"{class}\", {class}.class);"));
        }
        w.zone(ZoneId::server(ServerRole::AdditionalClasses), "");
        w.line(&format!("manager.start(args, \"{name}\");"));
        w.dedent();
        w.line("}");
        w.dedent();
        w.line("}");
        w.finish()
    }

    fn python_main(&self) -> SourceSkeleton {
        let file = format!("{}.py", self.server.name);
        let mut w = self.writer(&file);
        w.line("#!/usr/bin/env python");
        w.line("# -*- coding:utf-8 -*-");
        w.blank();
        self.banner(&mut w, &file, "#");
        w.line("import sys");
        w.line("import PyTango");
        for class in self.class_names() {
            w.line(&format!("from {class} import {class}, {class}Class"));
        }
        w.zone(ZoneId::server(ServerRole::Includes), "");
        w.blank();
        w.blank();
        w.line("def main():");
        w.indent();
        w.line("py = PyTango.Util(sys.argv)");
        for class in self.class_names() {
            w.line(&format!("py.add_class({class}Class, {class}, '{class}')"));
        }
        w.zone(ZoneId::server(ServerRole::AdditionalClasses), "");
        w.line("U = PyTango.Util.instance()");
        w.line("U.server_init()");
        w.line("U.server_run()");
        w.dedent();
        w.blank();
        w.blank();
        w.line("if __name__ == '__main__':");
        w.indent();
        w.line("main()");
        w.dedent();
        w.finish()
    }

    fn python_hl_main(&self) -> SourceSkeleton {
        let file = format!("{}.py", self.server.name);
        let mut w = self.writer(&file);
        w.line("#!/usr/bin/env python");
        w.line("# -*- coding:utf-8 -*-");
        w.blank();
        self.banner(&mut w, &file, "#");
        w.line("from tango.server import run");
        for class in self.class_names() {
            w.line(&format!("from {class} import {class}"));
        }
        w.zone(ZoneId::server(ServerRole::Includes), "");
        w.blank();
        w.blank();
        w.line("def main(args=None, **kwargs):");
        w.indent();
        let classes: Vec<&str> = self.class_names().collect();
        w.line(&format!("classes = [{}]", classes.join(", ")));
        w.zone(ZoneId::server(ServerRole::AdditionalClasses), "");
        w.line("return run(classes, args=args, **kwargs)");
        w.dedent();
        w.blank();
        w.blank();
        w.line("if __name__ == '__main__':");
        w.indent();
        w.line("main()");
        w.dedent();
        w.finish()
    }
}
