use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::warn;
use thiserror::Error;

use crate::config::Config;
use crate::ir::{Function, Item, ParsedData, Type};
use crate::{language, monomorph, topsort};

#[derive(Debug, Error)]
/// Errors during declaration generation.
pub enum GenerateError {
    /// Mangling only covers primitives and plain type names.
    #[error("generic argument `{arg}` of `{base}` cannot be mangled into a C name")]
    BadGenericArgument { base: String, arg: String },
}

/// Run the whole generation pipeline over parsed declarations.
pub fn generate(config: Config, mut data: ParsedData) -> Result<Bindings, GenerateError> {
    let monomorphs = monomorph::instantiate(&mut data, &config.export.exclude)?;
    data.structs.extend(monomorphs);

    // Exclusion removes definitions only; references keep the name.
    data.structs.retain(|s| !config.export.is_excluded(&s.name));
    data.enums.retain(|e| !config.export.is_excluded(&e.name));
    data.aliases.retain(|a| !config.export.is_excluded(&a.name));
    data.opaques.retain(|o| !config.export.is_excluded(&o.name));
    data.functions
        .retain(|f| !config.export.is_excluded(&f.name));

    let referenced = referenced_names(&data);

    let defined: HashSet<&str> = data
        .structs
        .iter()
        .map(|s| s.name.as_str())
        .chain(data.enums.iter().map(|e| e.name.as_str()))
        .chain(data.aliases.iter().map(|a| a.name.as_str()))
        .chain(data.opaques.iter().map(|o| o.name.as_str()))
        .collect();
    for name in &referenced {
        if !defined.contains(name.as_str()) && !config.export.is_excluded(name) {
            warn!("no definition for referenced type `{name}`");
        }
    }
    drop(defined);

    // Opaque types earn a forward declaration only when something still
    // refers to them.
    data.opaques.retain(|opaque| {
        referenced.contains(&opaque.name) || config.export.include.contains(&opaque.name)
    });

    let items: Vec<Item> = data
        .structs
        .into_iter()
        .map(Item::Struct)
        .chain(data.enums.into_iter().map(Item::Enum))
        .chain(data.aliases.into_iter().map(Item::Alias))
        .chain(data.opaques.into_iter().map(Item::Opaque))
        .collect();

    Ok(Bindings {
        config,
        items: topsort::topsort(items),
        functions: data.functions,
    })
}

fn referenced_names(data: &ParsedData) -> HashSet<String> {
    let mut names = HashSet::new();
    {
        let mut collect = |ty: &Type| {
            ty.for_each_path(&mut |name| {
                names.insert(name.to_string());
            })
        };
        for strct in &data.structs {
            for field in &strct.fields {
                collect(&field.ty);
            }
        }
        for alias in &data.aliases {
            collect(&alias.ty);
        }
        for function in &data.functions {
            for param in &function.params {
                collect(&param.ty);
            }
            if let Some(ret) = &function.ret {
                collect(ret);
            }
        }
    }
    names
}

/// The finished declarations, ready to be written out.
pub struct Bindings {
    pub(crate) config: Config,
    /// Type declarations in dependency order.
    pub(crate) items: Vec<Item>,
    pub(crate) functions: Vec<Function>,
}

impl Bindings {
    /// Render the declarations in the configured output language.
    pub fn write<W: Write>(&self, mut writable: W) -> io::Result<()> {
        let mut language = language::writer_for(&self.config);
        language.generate(&mut writable, self)
    }

    /// Write the declarations to `path`, creating parent directories as
    /// needed. Returns whether the file changed; an unchanged file is left
    /// untouched so its mtime stays intact for tools which might use it to
    /// know when to rebuild.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> io::Result<bool> {
        let path = path.as_ref();

        let mut output = Vec::new();
        self.write(&mut output)?;

        if let Ok(existing) = fs::read(path) {
            if existing == output {
                return Ok(false);
            }
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, output)?;
        Ok(true)
    }
}
