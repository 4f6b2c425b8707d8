use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypeError {
    #[error("unsupported type encountered: `{0}`")]
    UnsupportedType(String),
    #[error("tuples are not representable in a C declaration")]
    UnexpectedTuple,
    #[error("could not parse array length: {0}")]
    ArrayLength(String),
}

/// A scalar type with a fixed C projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Bool,
    /// `char` is a unicode scalar value, which crosses the boundary as its
    /// 32 bit code point.
    Char,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    ISize,
    USize,
    F32,
    F64,
    /// `std::os::raw::c_char`
    CChar,
    /// `std::os::raw::c_void`, only meaningful behind a pointer.
    CVoid,
}

impl Primitive {
    pub fn from_rust_name(name: &str) -> Option<Self> {
        Some(match name {
            "bool" => Self::Bool,
            "char" => Self::Char,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "isize" => Self::ISize,
            "usize" => Self::USize,
            "f32" => Self::F32,
            "f64" => Self::F64,
            "c_char" => Self::CChar,
            "c_void" => Self::CVoid,
            _ => return None,
        })
    }

    /// The Rust-facing spelling, used when mangling monomorph names.
    pub fn rust_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::ISize => "isize",
            Self::USize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::CChar => "c_char",
            Self::CVoid => "c_void",
        }
    }

    /// The C spelling.
    pub fn c_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "uint32_t",
            Self::I8 => "int8_t",
            Self::I16 => "int16_t",
            Self::I32 => "int32_t",
            Self::I64 => "int64_t",
            Self::U8 => "uint8_t",
            Self::U16 => "uint16_t",
            Self::U32 => "uint32_t",
            Self::U64 => "uint64_t",
            Self::ISize => "intptr_t",
            Self::USize => "uintptr_t",
            Self::F32 => "float",
            Self::F64 => "double",
            Self::CChar => "char",
            Self::CVoid => "void",
        }
    }

    /// The Cython spelling. Identical to C except for `bool`, which Cython
    /// spells `bint`.
    pub fn cython_name(&self) -> &'static str {
        match self {
            Self::Bool => "bint",
            other => other.c_name(),
        }
    }
}

/// A type as it appears in a field, alias target or function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Primitive(Primitive),
    /// A reference to a user declared type. A non-empty `generics` list makes
    /// this a generic instantiation, which monomorphization later collapses
    /// into a plain mangled name.
    Path { name: String, generics: Vec<Type> },
    /// `*const T` / `*mut T`; shared and unique references are treated the
    /// same way.
    Ptr { target: Box<Type>, is_const: bool },
    /// `[T; N]`
    Array { elem: Box<Type>, len: usize },
}

impl Type {
    /// Visit the name of every user type referenced by this type, including
    /// generic arguments.
    pub fn for_each_path(&self, f: &mut dyn FnMut(&str)) {
        match self {
            Self::Primitive(_) => {}
            Self::Path { name, generics } => {
                f(name);
                for generic in generics {
                    generic.for_each_path(f);
                }
            }
            Self::Ptr { target, .. } => target.for_each_path(f),
            Self::Array { elem, .. } => elem.for_each_path(f),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => f.write_str(primitive.rust_name()),
            Self::Path { name, generics } => {
                f.write_str(name)?;
                if let Some((first, rest)) = generics.split_first() {
                    write!(f, "<{first}")?;
                    for generic in rest {
                        write!(f, ", {generic}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::Ptr { target, is_const } => {
                let qualifier = if *is_const { "const" } else { "mut" };
                write!(f, "*{qualifier} {target}")
            }
            Self::Array { elem, len } => write!(f, "[{elem}; {len}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_c_projection() {
        assert_eq!(Primitive::U64.c_name(), "uint64_t");
        assert_eq!(Primitive::USize.c_name(), "uintptr_t");
        assert_eq!(Primitive::Char.c_name(), "uint32_t");
        assert_eq!(Primitive::CChar.c_name(), "char");
        assert_eq!(Primitive::Bool.cython_name(), "bint");
    }

    #[test]
    fn display_renders_rust_spelling() {
        let ty = Type::Ptr {
            target: Box::new(Type::Path {
                name: "Slice".into(),
                generics: vec![Type::Primitive(Primitive::U32)],
            }),
            is_const: true,
        };
        assert_eq!(ty.to_string(), "*const Slice<u32>");
    }
}
