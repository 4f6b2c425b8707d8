use log::{debug, warn};

use super::parse_types::generic_params;
use super::repr::{parse_repr, Repr};
use super::{is_public, parse_comment_attrs, ParseError};
use crate::ir::{Enum, EnumVariant, Field, Opaque, ParsedData, Struct, Type, TypeAlias};

pub(crate) fn parse_struct(
    item: &syn::ItemStruct,
    target: &mut ParsedData,
) -> Result<(), ParseError> {
    if !is_public(&item.vis) {
        debug!("skipping private struct `{}`", item.ident);
        return Ok(());
    }

    let name = item.ident.to_string();
    let comments = parse_comment_attrs(&item.attrs);

    match parse_repr(&item.attrs) {
        Repr::C => match &item.fields {
            syn::Fields::Named(fields) if !fields.named.is_empty() => {
                let fields = fields
                    .named
                    .iter()
                    .map(|field| {
                        Ok(Field {
                            name: field
                                .ident
                                .as_ref()
                                .map(ToString::to_string)
                                .unwrap_or_default(),
                            ty: Type::try_from(&field.ty)?,
                            comments: parse_comment_attrs(&field.attrs),
                        })
                    })
                    .collect::<Result<Vec<_>, ParseError>>()?;
                target.structs.push(Struct {
                    name,
                    generic_params: generic_params(&item.generics),
                    fields,
                    comments,
                });
            }
            syn::Fields::Unnamed(_) => return Err(ParseError::TupleStruct),
            // C has no empty structs; a fieldless type can still cross the
            // boundary behind a pointer.
            _ => target.opaques.push(Opaque { name, comments }),
        },
        Repr::Transparent => {
            let mut fields = item.fields.iter();
            match (fields.next(), fields.next()) {
                (Some(field), None) => target.aliases.push(TypeAlias {
                    name,
                    ty: Type::try_from(&field.ty)?,
                    comments,
                }),
                _ => return Err(ParseError::TransparentStruct { struct_ident: name }),
            }
        }
        Repr::Other => {
            warn!("struct `{name}` has an unsupported repr; treating it as opaque");
            target.opaques.push(Opaque { name, comments });
        }
        Repr::None => target.opaques.push(Opaque { name, comments }),
    }

    Ok(())
}

pub(crate) fn parse_enum(item: &syn::ItemEnum, target: &mut ParsedData) -> Result<(), ParseError> {
    if !is_public(&item.vis) {
        debug!("skipping private enum `{}`", item.ident);
        return Ok(());
    }

    let name = item.ident.to_string();
    let comments = parse_comment_attrs(&item.attrs);

    match parse_repr(&item.attrs) {
        Repr::C => {
            if !generic_params(&item.generics).is_empty() {
                warn!("generic enum `{name}` cannot be emitted; treating it as opaque");
                target.opaques.push(Opaque { name, comments });
                return Ok(());
            }
            let variants = item
                .variants
                .iter()
                .map(|variant| {
                    if !matches!(variant.fields, syn::Fields::Unit) {
                        return Err(ParseError::EnumVariantWithData {
                            enum_ident: name.clone(),
                        });
                    }
                    let value = match &variant.discriminant {
                        Some((
                            _,
                            syn::Expr::Lit(syn::ExprLit {
                                lit: syn::Lit::Int(int),
                                ..
                            }),
                        )) => Some(int.base10_parse::<i64>()?),
                        Some(_) => {
                            return Err(ParseError::UnsupportedDiscriminant {
                                enum_ident: name.clone(),
                            })
                        }
                        None => None,
                    };
                    Ok(EnumVariant {
                        name: variant.ident.to_string(),
                        value,
                        comments: parse_comment_attrs(&variant.attrs),
                    })
                })
                .collect::<Result<Vec<_>, ParseError>>()?;
            target.enums.push(Enum {
                name,
                variants,
                comments,
            });
        }
        Repr::Transparent | Repr::Other => {
            warn!("enum `{name}` is not repr(C); treating it as opaque");
            target.opaques.push(Opaque { name, comments });
        }
        Repr::None => target.opaques.push(Opaque { name, comments }),
    }

    Ok(())
}

pub(crate) fn parse_type_alias(
    item: &syn::ItemType,
    target: &mut ParsedData,
) -> Result<(), ParseError> {
    if !is_public(&item.vis) {
        debug!("skipping private type alias `{}`", item.ident);
        return Ok(());
    }

    let name = item.ident.to_string();
    if !generic_params(&item.generics).is_empty() {
        warn!("generic type alias `{name}` cannot be monomorphized; skipping it");
        return Ok(());
    }

    target.aliases.push(TypeAlias {
        name,
        ty: Type::try_from(&*item.ty)?,
        comments: parse_comment_attrs(&item.attrs),
    });

    Ok(())
}
