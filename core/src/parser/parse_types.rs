use quote::ToTokens;
use syn::{GenericParam, TypeArray, TypePath, TypePtr, TypeReference};

use crate::ir::{Primitive, Type, TypeError};

impl TryFrom<&syn::Type> for Type {
    type Error = TypeError;

    fn try_from(ty: &syn::Type) -> Result<Self, Self::Error> {
        Ok(match ty {
            syn::Type::Path(TypePath { path, .. }) => {
                let segment = path
                    .segments
                    .last()
                    .ok_or_else(|| TypeError::UnsupportedType(path.to_token_stream().to_string()))?;
                let name = segment.ident.to_string();
                let generics: Vec<Self> = match &segment.arguments {
                    syn::PathArguments::AngleBracketed(angle_bracketed) => angle_bracketed
                        .args
                        .iter()
                        .filter_map(|arg| match arg {
                            syn::GenericArgument::Type(ty) => Some(Self::try_from(ty)),
                            _ => None,
                        })
                        .collect::<Result<_, _>>()?,
                    _ => Vec::new(),
                };
                match Primitive::from_rust_name(&name) {
                    Some(primitive) => Self::Primitive(primitive),
                    // A Box crosses the boundary as a plain pointer.
                    None if name == "Box" => {
                        let target = generics
                            .into_iter()
                            .next()
                            .ok_or(TypeError::UnsupportedType(name))?;
                        Self::Ptr {
                            target: Box::new(target),
                            is_const: false,
                        }
                    }
                    None => Self::Path { name, generics },
                }
            }
            syn::Type::Ptr(TypePtr {
                elem, const_token, ..
            }) => Self::Ptr {
                target: Box::new(Self::try_from(elem.as_ref())?),
                is_const: const_token.is_some(),
            },
            syn::Type::Reference(TypeReference {
                elem, mutability, ..
            }) => Self::Ptr {
                target: Box::new(Self::try_from(elem.as_ref())?),
                is_const: mutability.is_none(),
            },
            syn::Type::Array(TypeArray { elem, len, .. }) => {
                let len = match len {
                    syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Int(count),
                        ..
                    }) => count
                        .base10_parse()
                        .map_err(|_| TypeError::ArrayLength(count.to_string()))?,
                    other => {
                        return Err(TypeError::ArrayLength(
                            other.to_token_stream().to_string(),
                        ))
                    }
                };
                Self::Array {
                    elem: Box::new(Self::try_from(elem.as_ref())?),
                    len,
                }
            }
            syn::Type::Tuple(_) => return Err(TypeError::UnexpectedTuple),
            _ => {
                return Err(TypeError::UnsupportedType(
                    ty.to_token_stream().to_string(),
                ))
            }
        })
    }
}

/// The type parameter names of a declaration, in order.
pub(crate) fn generic_params(generics: &syn::Generics) -> Vec<String> {
    generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(type_param) => Some(type_param.ident.to_string()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Type {
        let ty: syn::Type = syn::parse_str(source).unwrap();
        Type::try_from(&ty).unwrap()
    }

    #[test]
    fn primitives_and_paths() {
        assert_eq!(parse("u64"), Type::Primitive(Primitive::U64));
        assert_eq!(
            parse("std::os::raw::c_char"),
            Type::Primitive(Primitive::CChar)
        );
        assert_eq!(
            parse("Bar"),
            Type::Path {
                name: "Bar".into(),
                generics: Vec::new()
            }
        );
    }

    #[test]
    fn generic_instantiations_keep_their_arguments() {
        assert_eq!(
            parse("Option<Foo>"),
            Type::Path {
                name: "Option".into(),
                generics: vec![Type::Path {
                    name: "Foo".into(),
                    generics: Vec::new()
                }]
            }
        );
    }

    #[test]
    fn pointers_and_arrays() {
        assert_eq!(
            parse("*const u8"),
            Type::Ptr {
                target: Box::new(Type::Primitive(Primitive::U8)),
                is_const: true
            }
        );
        assert_eq!(
            parse("Box<Device>"),
            Type::Ptr {
                target: Box::new(Type::Path {
                    name: "Device".into(),
                    generics: Vec::new()
                }),
                is_const: false
            }
        );
        assert_eq!(
            parse("[f32; 8]"),
            Type::Array {
                elem: Box::new(Type::Primitive(Primitive::F32)),
                len: 8
            }
        );
    }

    #[test]
    fn tuples_are_rejected() {
        let ty: syn::Type = syn::parse_str("(u8, u8)").unwrap();
        assert!(matches!(
            Type::try_from(&ty),
            Err(TypeError::UnexpectedTuple)
        ));
    }
}
