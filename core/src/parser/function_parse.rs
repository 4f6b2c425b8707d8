use log::debug;

use super::repr::has_no_mangle;
use super::{is_public, parse_comment_attrs, ParseError};
use crate::ir::{Function, Parameter, ParsedData, Type};

/// Extract an exported function. Anything without the full
/// `#[no_mangle] pub extern "C"` combination keeps its Rust-only ABI and is
/// ignored.
pub(crate) fn parse_function(
    item: &syn::ItemFn,
    target: &mut ParsedData,
) -> Result<(), ParseError> {
    if !is_public(&item.vis) || !has_no_mangle(&item.attrs) || !is_extern_c(&item.sig) {
        debug!("skipping unexported function `{}`", item.sig.ident);
        return Ok(());
    }

    let name = item.sig.ident.to_string();

    let params = item
        .sig
        .inputs
        .iter()
        .map(|input| {
            let syn::FnArg::Typed(pat_type) = input else {
                return Err(ParseError::UnsupportedFunctionParameter {
                    fn_ident: name.clone(),
                });
            };
            let syn::Pat::Ident(pat_ident) = pat_type.pat.as_ref() else {
                return Err(ParseError::UnsupportedFunctionParameter {
                    fn_ident: name.clone(),
                });
            };
            Ok(Parameter {
                name: pat_ident.ident.to_string(),
                ty: Type::try_from(pat_type.ty.as_ref())?,
            })
        })
        .collect::<Result<Vec<_>, ParseError>>()?;

    let ret = match &item.sig.output {
        syn::ReturnType::Default => None,
        syn::ReturnType::Type(_, ty) => match ty.as_ref() {
            syn::Type::Tuple(tuple) if tuple.elems.is_empty() => None,
            ty => Some(Type::try_from(ty)?),
        },
    };

    target.functions.push(Function {
        name,
        params,
        ret,
        comments: parse_comment_attrs(&item.attrs),
    });

    Ok(())
}

fn is_extern_c(sig: &syn::Signature) -> bool {
    match &sig.abi {
        Some(abi) => abi
            .name
            .as_ref()
            .map_or(true, |name| name.value() == "C"),
        None => false,
    }
}
