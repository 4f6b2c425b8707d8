mod function_parse;
mod item_parse;
mod parse_types;
mod repr;

use syn::{Attribute, Expr, Meta};
use thiserror::Error;

use crate::ir::{ParsedData, TypeError};

/// Errors that can occur while parsing Rust source input.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ParseError {
    #[error("{0}")]
    SynError(#[from] syn::Error),
    #[error("failed to parse a rust type: {0}")]
    TypeError(#[from] TypeError),
    #[error("enum variants with data are not representable in a C enum: {enum_ident}")]
    EnumVariantWithData { enum_ident: String },
    #[error("discriminants must be integer literals: {enum_ident}")]
    UnsupportedDiscriminant { enum_ident: String },
    #[error("tuple structs are only supported with repr(transparent)")]
    TupleStruct,
    #[error("repr(transparent) requires exactly one field: {struct_ident}")]
    TransparentStruct { struct_ident: String },
    #[error("function parameters must be plain identifiers: {fn_ident}")]
    UnsupportedFunctionParameter { fn_ident: String },
}

/// Parse the given Rust source string into `ParsedData`.
pub fn parse(input: &str) -> Result<ParsedData, ParseError> {
    let mut parsed_data = ParsedData::default();
    parse_into(input, &mut parsed_data)?;
    Ok(parsed_data)
}

pub fn parse_into(input: &str, target: &mut ParsedData) -> Result<(), ParseError> {
    let syn_file = syn::parse_file(input)?;

    let mut items = Vec::new();
    flatten_items(&syn_file.items, &mut items);

    for item in items {
        match item {
            syn::Item::Struct(s) => item_parse::parse_struct(s, target)?,
            syn::Item::Enum(e) => item_parse::parse_enum(e, target)?,
            syn::Item::Type(t) => item_parse::parse_type_alias(t, target)?,
            syn::Item::Fn(f) => function_parse::parse_function(f, target)?,
            _ => {}
        }
    }

    Ok(())
}

/// Flattens the contents of inline `mod` blocks into one item list.
fn flatten_items<'a>(items: &'a [syn::Item], out: &mut Vec<&'a syn::Item>) {
    for item in items {
        match item {
            syn::Item::Mod(syn::ItemMod {
                content: Some((_, items)),
                ..
            }) => flatten_items(items, out),
            other => out.push(other),
        }
    }
}

/// Parses any doc comment out of the given slice of attributes
pub(crate) fn parse_comment_attrs(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(name_value) if name_value.path.is_ident("doc") => {
                match &name_value.value {
                    Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(comment),
                        ..
                    }) => Some(comment.value().trim().to_string()),
                    _ => None,
                }
            }
            _ => None,
        })
        .collect()
}

pub(crate) fn is_public(vis: &syn::Visibility) -> bool {
    matches!(vis, syn::Visibility::Public(_))
}
