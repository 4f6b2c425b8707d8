mod alias;
mod enumeration;
mod function;
mod structure;
mod ty;

pub use alias::TypeAlias;
pub use enumeration::{Enum, EnumVariant};
pub use function::{Function, Parameter};
pub use structure::{Field, Opaque, Struct};
pub use ty::{Primitive, Type, TypeError};

/// A top level type declaration extracted from Rust source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Struct(Struct),
    Enum(Enum),
    Alias(TypeAlias),
    Opaque(Opaque),
}

impl Item {
    /// The name the declaration is emitted under.
    pub fn name(&self) -> &str {
        match self {
            Self::Struct(s) => &s.name,
            Self::Enum(e) => &e.name,
            Self::Alias(a) => &a.name,
            Self::Opaque(o) => &o.name,
        }
    }

    /// Visit every type this item's definition refers to.
    pub(crate) fn for_each_type(&self, f: &mut dyn FnMut(&Type)) {
        match self {
            Self::Struct(s) => {
                for field in &s.fields {
                    f(&field.ty);
                }
            }
            Self::Alias(a) => f(&a.ty),
            Self::Enum(_) | Self::Opaque(_) => {}
        }
    }
}

/// An error produced while parsing one input file.
#[derive(Debug)]
pub struct FileError {
    pub file_name: String,
    pub error: crate::parser::ParseError,
}

/// Everything headshare extracted from a set of Rust sources.
#[derive(Debug, Default)]
pub struct ParsedData {
    pub structs: Vec<Struct>,
    pub enums: Vec<Enum>,
    pub aliases: Vec<TypeAlias>,
    pub opaques: Vec<Opaque>,
    pub functions: Vec<Function>,
    pub errors: Vec<FileError>,
}

impl ParsedData {
    /// Fold another file's declarations into this one.
    pub fn merge(&mut self, other: ParsedData) {
        self.structs.extend(other.structs);
        self.enums.extend(other.enums);
        self.aliases.extend(other.aliases);
        self.opaques.extend(other.opaques);
        self.functions.extend(other.functions);
        self.errors.extend(other.errors);
    }
}
