use std::io::{self, Write};

use itertools::Itertools;
use log::warn;

use super::{push_comments, Blocks, Language};
use crate::bindings::Bindings;
use crate::config::Config;
use crate::ir::{Enum, Function, Item, Opaque, Struct, Type, TypeAlias};

const STDINT_CIMPORTS: &[&str] = &[
    "from libc.stdint cimport int8_t, int16_t, int32_t, int64_t, intptr_t",
    "from libc.stdint cimport uint8_t, uint16_t, uint32_t, uint64_t, uintptr_t",
];

/// All information needed to write Cython declaration files. Everything
/// lands inside a single `cdef extern from *:` block; the configured style
/// and cpp-compat switches have no Cython counterpart and are ignored.
pub struct Cython {
    config: Config,
}

impl Cython {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn docs(&self, out: &mut String, comments: &[String], indent: &str) {
        if self.config.documentation {
            push_comments(out, comments, indent, "#");
        }
    }

    fn type_name(&self, ty: &Type) -> String {
        match ty {
            Type::Primitive(primitive) => primitive.cython_name().to_string(),
            Type::Path { name, .. } => self.config.export.rename(name),
            Type::Ptr { target, is_const } => {
                let qualifier = if *is_const { "const " } else { "" };
                format!("{qualifier}{}*", self.type_name(target))
            }
            Type::Array { elem, .. } => {
                warn!("array type used in a position Cython cannot express; using the element type");
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
        self.docs(&mut out, &strct.comments, "  ");
        out.push_str(&format!(
            "  ctypedef struct {}:\n",
            self.config.export.rename(&strct.name)
        ));
        if strct.fields.is_empty() {
            out.push_str("    pass\n");
        }
        for field in &strct.fields {
            self.docs(&mut out, &field.comments, "    ");
            out.push_str("    ");
            out.push_str(&self.declaration(&field.ty, &field.name));
            out.push_str(";\n");
        }
        out.truncate(out.trim_end_matches('\n').len());
        out
    }

    fn render_enum(&self, enumeration: &Enum) -> String {
        let mut out = String::new();
        self.docs(&mut out, &enumeration.comments, "  ");
        out.push_str(&format!(
            "  ctypedef enum {}:\n",
            self.config.export.rename(&enumeration.name)
        ));
        for variant in &enumeration.variants {
            self.docs(&mut out, &variant.comments, "    ");
            match variant.value {
                Some(value) => out.push_str(&format!("    {} = {value},\n", variant.name)),
                None => out.push_str(&format!("    {},\n", variant.name)),
            }
        }
        out.truncate(out.trim_end_matches('\n').len());
        out
    }

    fn render_alias(&self, alias: &TypeAlias) -> String {
        let mut out = String::new();
        self.docs(&mut out, &alias.comments, "  ");
        let name = self.config.export.rename(&alias.name);
        out.push_str(&format!(
            "  ctypedef {};",
            self.declaration(&alias.ty, &name)
        ));
        out
    }

    fn render_opaque(&self, opaque: &Opaque) -> String {
        let mut out = String::new();
        self.docs(&mut out, &opaque.comments, "  ");
        out.push_str(&format!(
            "  ctypedef struct {}:\n    pass",
            self.config.export.rename(&opaque.name)
        ));
        out
    }

    fn render_function(&self, function: &Function) -> String {
        let mut out = String::new();
        self.docs(&mut out, &function.comments, "  ");
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
        out.push_str("  ");
        out.push_str(&signature);
        out.push(';');
        out
    }
}

impl Language for Cython {
    fn generate(&mut self, writable: &mut dyn Write, bindings: &Bindings) -> io::Result<()> {
        let mut blocks = Blocks::new();
        if let Some(header) = &self.config.header {
            blocks.push(format!("{}\n", header.trim_end()));
        }
        blocks.push(STDINT_CIMPORTS.join("\n"));

        let entries: Vec<String> = bindings
            .items
            .iter()
            .map(|item| self.render_item(item))
            .chain(
                bindings
                    .functions
                    .iter()
                    .map(|function| self.render_function(function)),
            )
            .collect();

        if entries.is_empty() {
            blocks.push("cdef extern from *:\n  pass");
        } else {
            blocks.push(format!("cdef extern from *:\n\n{}", entries.join("\n\n")));
        }

        blocks.write(writable)
    }
}
