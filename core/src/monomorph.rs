//! Generic structs are templates; only their concrete instantiations appear
//! in the output, under an underscore-mangled name (`Slice<u32>` becomes
//! `Slice_u32`).

use std::collections::{HashMap, HashSet, VecDeque};

use log::warn;

use crate::bindings::GenerateError;
use crate::ir::{ParsedData, Struct, Type};

/// A pending instantiation discovered while rewriting type references.
struct Instantiation {
    base: String,
    args: Vec<Type>,
    mangled: String,
}

/// Rewrite every generic type reference in `data` to its mangled name and
/// return the monomorphized struct definitions, in discovery order.
pub(crate) fn instantiate(
    data: &mut ParsedData,
    exclude: &[String],
) -> Result<Vec<Struct>, GenerateError> {
    let mut concrete = Vec::new();
    let mut templates = HashMap::new();
    for strct in data.structs.drain(..) {
        if strct.is_template() {
            templates.insert(strct.name.clone(), strct);
        } else {
            concrete.push(strct);
        }
    }
    data.structs = concrete;

    let mut pending = VecDeque::new();
    let mut seen = HashSet::new();

    for strct in &mut data.structs {
        for field in &mut strct.fields {
            rewrite_type(&mut field.ty, &mut pending, &mut seen)?;
        }
    }
    for alias in &mut data.aliases {
        rewrite_type(&mut alias.ty, &mut pending, &mut seen)?;
    }
    for function in &mut data.functions {
        for param in &mut function.params {
            rewrite_type(&mut param.ty, &mut pending, &mut seen)?;
        }
        if let Some(ret) = &mut function.ret {
            rewrite_type(ret, &mut pending, &mut seen)?;
        }
    }

    let mut monomorphs = Vec::new();
    while let Some(instantiation) = pending.pop_front() {
        let Some(template) = templates.get(&instantiation.base) else {
            if !exclude.iter().any(|name| name == &instantiation.mangled) {
                warn!(
                    "no generic type named `{}` to instantiate as `{}`; \
                     its definition must be provided elsewhere",
                    instantiation.base, instantiation.mangled
                );
            }
            continue;
        };

        if template.generic_params.len() != instantiation.args.len() {
            warn!(
                "`{}` takes {} type parameters but `{}` supplies {}; skipping",
                instantiation.base,
                template.generic_params.len(),
                instantiation.mangled,
                instantiation.args.len()
            );
            continue;
        }

        let substitutions: HashMap<String, Type> = template
            .generic_params
            .iter()
            .cloned()
            .zip(instantiation.args.iter().cloned())
            .collect();

        let mut fields = template.fields.clone();
        for field in &mut fields {
            substitute(&mut field.ty, &substitutions);
            rewrite_type(&mut field.ty, &mut pending, &mut seen)?;
        }

        monomorphs.push(Struct {
            name: instantiation.mangled,
            generic_params: Vec::new(),
            fields,
            comments: template.comments.clone(),
        });
    }

    Ok(monomorphs)
}

/// Collapse generic path references bottom-up, queueing each newly seen
/// instantiation.
fn rewrite_type(
    ty: &mut Type,
    pending: &mut VecDeque<Instantiation>,
    seen: &mut HashSet<String>,
) -> Result<(), GenerateError> {
    match ty {
        Type::Path { name, generics } => {
            for generic in generics.iter_mut() {
                rewrite_type(generic, pending, seen)?;
            }
            if generics.is_empty() {
                return Ok(());
            }
            let mangled = mangle(name, generics)?;
            if seen.insert(mangled.clone()) {
                pending.push_back(Instantiation {
                    base: name.clone(),
                    args: std::mem::take(generics),
                    mangled: mangled.clone(),
                });
            } else {
                generics.clear();
            }
            *name = mangled;
            Ok(())
        }
        Type::Ptr { target, .. } => rewrite_type(target, pending, seen),
        Type::Array { elem, .. } => rewrite_type(elem, pending, seen),
        Type::Primitive(_) => Ok(()),
    }
}

/// The output name of an instantiation: base and argument names joined with
/// underscores. Arguments are already collapsed when this runs, so the only
/// valid shapes are primitives and bare paths.
fn mangle(base: &str, args: &[Type]) -> Result<String, GenerateError> {
    let mut parts = vec![base.to_string()];
    for arg in args {
        match arg {
            Type::Primitive(primitive) => parts.push(primitive.rust_name().to_string()),
            Type::Path { name, generics } if generics.is_empty() => parts.push(name.clone()),
            other => {
                return Err(GenerateError::BadGenericArgument {
                    base: base.to_string(),
                    arg: other.to_string(),
                })
            }
        }
    }
    Ok(parts.join("_"))
}

/// Replace bare references to a template's type parameters.
fn substitute(ty: &mut Type, substitutions: &HashMap<String, Type>) {
    let replacement = match &*ty {
        Type::Path { name, generics } if generics.is_empty() => {
            substitutions.get(name.as_str()).cloned()
        }
        _ => None,
    };
    if let Some(replacement) = replacement {
        *ty = replacement;
        return;
    }
    match ty {
        Type::Path { generics, .. } => {
            for generic in generics.iter_mut() {
                substitute(generic, substitutions);
            }
        }
        Type::Ptr { target, .. } => substitute(target, substitutions),
        Type::Array { elem, .. } => substitute(elem, substitutions),
        Type::Primitive(_) => {}
    }
}
