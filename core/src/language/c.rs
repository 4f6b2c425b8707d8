use std::collections::HashSet;
use std::io::{self, Write};

use itertools::Itertools;
use log::warn;

use super::{push_comments, Blocks, Language};
use crate::bindings::Bindings;
use crate::config::{Config, Style};
use crate::ir::{Enum, Function, Item, Opaque, Struct, Type, TypeAlias};

const DEFAULT_SYS_INCLUDES: &[&str] = &["stdarg.h", "stdbool.h", "stdint.h", "stdlib.h"];

/// All information needed to write C99 headers.
pub struct C {
    config: Config,
    /// Names that need the `struct` keyword at use sites under the tag style.
    struct_tags: HashSet<String>,
    /// Same, for the `enum` keyword.
    enum_tags: HashSet<String>,
}

impl C {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            struct_tags: HashSet::new(),
            enum_tags: HashSet::new(),
        }
    }

    fn collect_tags(&mut self, bindings: &Bindings) {
        if self.config.style != Style::Tag {
            return;
        }
        for item in &bindings.items {
            match item {
                Item::Struct(Struct { name, .. }) | Item::Opaque(Opaque { name, .. }) => {
                    self.struct_tags.insert(name.clone());
                }
                Item::Enum(Enum { name, .. }) => {
                    self.enum_tags.insert(name.clone());
                }
                Item::Alias(_) => {}
            }
        }
    }

    fn docs(&self, out: &mut String, comments: &[String], indent: &str) {
        if self.config.documentation {
            push_comments(out, comments, indent, "//");
        }
    }

    /// A use-site reference to a user type, with the tag keyword when the
    /// style calls for one.
    fn type_reference(&self, name: &str) -> String {
        let renamed = self.config.export.rename(name);
        if self.struct_tags.contains(name) {
            format!("struct {renamed}")
        } else if self.enum_tags.contains(name) {
            format!("enum {renamed}")
        } else {
            renamed
        }
    }

    fn type_name(&self, ty: &Type) -> String {
        match ty {
            Type::Primitive(primitive) => primitive.c_name().to_string(),
            Type::Path { name, .. } => self.type_reference(name),
            Type::Ptr { target, is_const } => {
                let qualifier = if *is_const { "const " } else { "" };
                format!("{qualifier}{}*", self.type_name(target))
            }
            Type::Array { elem, .. } => {
                warn!("array type used in a position C cannot express; using the element type");
                self.type_name(elem)
            }
        }
    }

    /// `declarator` is the name being declared, or a whole function
    /// declarator like `root(Bar f)`.
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
        let name = self.config.export.rename(&strct.name);
        match self.config.style {
            Style::Type => out.push_str("typedef struct {\n"),
            Style::Tag => out.push_str(&format!("struct {name} {{\n")),
            Style::Both => out.push_str(&format!("typedef struct {name} {{\n")),
        }
        for field in &strct.fields {
            self.docs(&mut out, &field.comments, "  ");
            out.push_str("  ");
            out.push_str(&self.declaration(&field.ty, &field.name));
            out.push_str(";\n");
        }
        match self.config.style {
            Style::Type | Style::Both => out.push_str(&format!("}} {name};")),
            Style::Tag => out.push_str("};"),
        }
        out
    }

    fn render_enum(&self, enumeration: &Enum) -> String {
        let mut out = String::new();
        self.docs(&mut out, &enumeration.comments, "");
        let name = self.config.export.rename(&enumeration.name);
        match self.config.style {
            Style::Type => out.push_str("typedef enum {\n"),
            Style::Tag => out.push_str(&format!("enum {name} {{\n")),
            Style::Both => out.push_str(&format!("typedef enum {name} {{\n")),
        }
        for variant in &enumeration.variants {
            self.docs(&mut out, &variant.comments, "  ");
            match variant.value {
                Some(value) => out.push_str(&format!("  {} = {value},\n", variant.name)),
                None => out.push_str(&format!("  {},\n", variant.name)),
            }
        }
        match self.config.style {
            Style::Type | Style::Both => out.push_str(&format!("}} {name};")),
            Style::Tag => out.push_str("};"),
        }
        out
    }

    fn render_alias(&self, alias: &TypeAlias) -> String {
        let mut out = String::new();
        self.docs(&mut out, &alias.comments, "");
        let name = self.config.export.rename(&alias.name);
        out.push_str(&format!("typedef {};", self.declaration(&alias.ty, &name)));
        out
    }

    fn render_opaque(&self, opaque: &Opaque) -> String {
        let mut out = String::new();
        self.docs(&mut out, &opaque.comments, "");
        let name = self.config.export.rename(&opaque.name);
        match self.config.style {
            Style::Tag => out.push_str(&format!("struct {name};")),
            Style::Type | Style::Both => {
                out.push_str(&format!("typedef struct {name} {name};"))
            }
        }
        out
    }

    fn render_function(&self, function: &Function) -> String {
        let mut out = String::new();
        self.docs(&mut out, &function.comments, "");
        let params = if function.params.is_empty() {
            "void".to_string()
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

    fn includes(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.config.no_includes {
            let sys = match &self.config.sys_includes {
                Some(sys) => sys.clone(),
                None => DEFAULT_SYS_INCLUDES.iter().map(|s| s.to_string()).collect(),
            };
            lines.extend(sys.iter().map(|include| format!("#include <{include}>")));
        }
        lines.extend(
            self.config
                .includes
                .iter()
                .map(|include| format!("#include \"{include}\"")),
        );
        lines
    }
}

impl Language for C {
    fn generate(&mut self, writable: &mut dyn Write, bindings: &Bindings) -> io::Result<()> {
        self.collect_tags(bindings);

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
        let includes = self.includes();
        if !includes.is_empty() {
            blocks.push(includes.join("\n"));
        }

        for item in &bindings.items {
            blocks.push(self.render_item(item));
        }

        if !bindings.functions.is_empty() {
            if self.config.cpp_compat {
                blocks.push("#ifdef __cplusplus\nextern \"C\" {\n#endif // __cplusplus");
            }
            for function in &bindings.functions {
                blocks.push(self.render_function(function));
            }
            if self.config.cpp_compat {
                blocks.push("#ifdef __cplusplus\n} // extern \"C\"\n#endif // __cplusplus");
            }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Primitive;

    fn writer() -> C {
        C::new(Config::default())
    }

    #[test]
    fn declaration_spacing() {
        let writer = writer();
        let ptr = Type::Ptr {
            target: Box::new(Type::Primitive(Primitive::U8)),
            is_const: true,
        };
        assert_eq!(writer.declaration(&ptr, "data"), "const uint8_t *data");

        let array = Type::Array {
            elem: Box::new(Type::Primitive(Primitive::F32)),
            len: 8,
        };
        assert_eq!(writer.declaration(&array, "gain"), "float gain[8]");

        let plain = Type::Primitive(Primitive::USize);
        assert_eq!(writer.declaration(&plain, "len"), "uintptr_t len");
    }

    #[test]
    fn tag_style_adds_keywords_at_use_sites() {
        let mut writer = C::new(Config {
            style: Style::Tag,
            ..Config::default()
        });
        writer.struct_tags.insert("Bar".into());
        writer.enum_tags.insert("StatusCode".into());
        assert_eq!(writer.type_reference("Bar"), "struct Bar");
        assert_eq!(writer.type_reference("StatusCode"), "enum StatusCode");
        assert_eq!(writer.type_reference("Option_Foo"), "Option_Foo");
    }

    #[test]
    fn prefix_applies_to_types_only() {
        let config = Config {
            export: crate::config::ExportConfig {
                prefix: Some("Lib".into()),
                ..Default::default()
            },
            ..Config::default()
        };
        let writer = C::new(config);
        let function = Function {
            name: "mixer_create".into(),
            params: Vec::new(),
            ret: Some(Type::Path {
                name: "Mixer".into(),
                generics: Vec::new(),
            }),
            comments: Vec::new(),
        };
        assert_eq!(
            writer.render_function(&function),
            "LibMixer mixer_create(void);"
        );
    }
}
