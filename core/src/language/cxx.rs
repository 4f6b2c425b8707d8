use std::io::{self, Write};

use itertools::Itertools;
use log::warn;

use super::{push_comments, Blocks, Language};
use crate::bindings::Bindings;
use crate::config::Config;
use crate::ir::{Enum, Function, Item, Opaque, Struct, Type, TypeAlias};

const DEFAULT_SYS_INCLUDES: &[&str] = &["cstdarg", "cstdint", "cstdlib"];

/// All information needed to write C++ headers. C++ needs neither typedef
/// tricks nor tag keywords, so the configured style is ignored; functions
/// always sit in an `extern "C"` block.
pub struct Cxx {
    config: Config,
}

impl Cxx {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn docs(&self, out: &mut String, comments: &[String], indent: &str) {
        if self.config.documentation {
            push_comments(out, comments, indent, "//");
        }
    }

    fn type_name(&self, ty: &Type) -> String {
        match ty {
            Type::Primitive(primitive) => primitive.c_name().to_string(),
            Type::Path { name, .. } => self.config.export.rename(name),
            Type::Ptr { target, is_const } => {
                let qualifier = if *is_const { "const " } else { "" };
                format!("{qualifier}{}*", self.type_name(target))
            }
            Type::Array { elem, .. } => {
                warn!("array type used in a position C++ cannot express; using the element type");
                self.type_name(elem)
            }
        }
    }

    fn declaration(&self, ty: &Type, declarator: &str) -> String {
        match ty {
            Type::Ptr { target, is_const } => {
                let qualifier = if *is_const { "const " } else { "" };
                format!("{qualifier}{} *{declarator}", self.type_name(target))
            }
            Type::Array { elem, len } => {
                format!("{} {declarator}[{len}]", self.type_name(elem))
            }
            other => format!("{} {declarator}", self.type_name(other)),
        }
    }

    fn render_item(&self, item: &Item) -> String {
        match item {
            Item::Struct(strct) => self.render_struct(strct),
            Item::Enum(enumeration) => self.render_enum(enumeration),
            Item::Alias(alias) => self.render_alias(alias),
            Item::Opaque(opaque) => self.render_opaque(opaque),
        }
    }

    fn render_struct(&self, strct: &Struct) -> String {
        let mut out = String::new();
        self.docs(&mut out, &strct.comments, "");
        out.push_str(&format!(
            "struct {} {{\n",
            self.config.export.rename(&strct.name)
        ));
        for field in &strct.fields {
            self.docs(&mut out, &field.comments, "  ");
            out.push_str("  ");
            out.push_str(&self.declaration(&field.ty, &field.name));
            out.push_str(";\n");
        }
        out.push_str("};");
        out
    }

    fn render_enum(&self, enumeration: &Enum) -> String {
        let mut out = String::new();
        self.docs(&mut out, &enumeration.comments, "");
        out.push_str(&format!(
            "enum class {} {{\n",
            self.config.export.rename(&enumeration.name)
        ));
        for variant in &enumeration.variants {
            self.docs(&mut out, &variant.comments, "  ");
            match variant.value {
                Some(value) => out.push_str(&format!("  {} = {value},\n", variant.name)),
                None => out.push_str(&format!("  {},\n", variant.name)),
            }
        }
        out.push_str("};");
        out
    }

    fn render_alias(&self, alias: &TypeAlias) -> String {
        let mut out = String::new();
        self.docs(&mut out, &alias.comments, "");
        let name = self.config.export.rename(&alias.name);
        match &alias.ty {
            // `using` has no declarator syntax for arrays; fall back to a
            // typedef, which C++ still accepts.
            Type::Array { .. } => {
                out.push_str(&format!("typedef {};", self.declaration(&alias.ty, &name)))
            }
            ty => out.push_str(&format!("using {name} = {};", self.type_name(ty))),
        }
        out
    }

    fn render_opaque(&self, opaque: &Opaque) -> String {
        let mut out = String::new();
        self.docs(&mut out, &opaque.comments, "");
        out.push_str(&format!(
            "struct {};",
            self.config.export.rename(&opaque.name)
        ));
        out
    }

    fn render_function(&self, function: &Function) -> String {
        let mut out = String::new();
        self.docs(&mut out, &function.comments, "");
        let params = if function.params.is_empty() {
            String::new()
        } else {
            function
                .params
                .iter()
                .map(|param| self.declaration(&param.ty, &param.name))
                .join(", ")
        };
        let declarator = format!("{}({params})", function.name);
        let signature = match &function.ret {
            Some(ty) => self.declaration(ty, &declarator),
            None => format!("void {declarator}"),
        };
        out.push_str(&signature);
        out.push(';');
        out
    }
}

impl Language for Cxx {
    fn generate(&mut self, writable: &mut dyn Write, bindings: &Bindings) -> io::Result<()> {
        let mut blocks = Blocks::new();
        if let Some(header) = &self.config.header {
            blocks.push(format!("{}\n", header.trim_end()));
        }
        if let Some(guard) = &self.config.include_guard {
            blocks.push(format!("#ifndef {guard}\n#define {guard}"));
        }
        if let Some(warning) = &self.config.autogen_warning {
            blocks.push(warning.trim_end());
        }

        let mut includes = Vec::new();
        if !self.config.no_includes {
            let sys = match &self.config.sys_includes {
                Some(sys) => sys.clone(),
                None => DEFAULT_SYS_INCLUDES.iter().map(|s| s.to_string()).collect(),
            };
            includes.extend(sys.iter().map(|include| format!("#include <{include}>")));
        }
        includes.extend(
            self.config
                .includes
                .iter()
                .map(|include| format!("#include \"{include}\"")),
        );
        if !includes.is_empty() {
            blocks.push(includes.join("\n"));
        }

        if let Some(namespace) = &self.config.namespace {
            blocks.push(format!("namespace {namespace} {{"));
        }

        for item in &bindings.items {
            blocks.push(self.render_item(item));
        }

        if !bindings.functions.is_empty() {
            blocks.push("extern \"C\" {");
            for function in &bindings.functions {
                blocks.push(self.render_function(function));
            }
            blocks.push("} // extern \"C\"");
        }

        if let Some(namespace) = &self.config.namespace {
            blocks.push(format!("}} // namespace {namespace}"));
        }

        if let Some(trailer) = &self.config.trailer {
            blocks.push(trailer.trim_end());
        }
        if let Some(guard) = &self.config.include_guard {
            blocks.push(format!("#endif // {guard}"));
        }

        blocks.write(writable)
    }
}
