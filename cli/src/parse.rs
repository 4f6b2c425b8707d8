//! Input discovery and parsing.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use headshare_core::ir::{FileError, ParsedData};
use ignore::types::TypesBuilder;
use ignore::WalkBuilder;
use log::debug;

use crate::args::Args;

/// Collect every Rust source file named by the inputs. Directories are
/// walked recursively; entries come back sorted so generation order does not
/// depend on filesystem enumeration order.
pub fn collect_sources(options: &Args) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut directories = Vec::new();
    for input in &options.inputs {
        if input.is_dir() {
            directories.push(input);
        } else {
            files.push(input.clone());
        }
    }

    if let Some((first_root, rest)) = directories.split_first() {
        let mut types = TypesBuilder::new();
        types
            .add("rust", "*.rs")
            .context("Failed to add rust type extensions")?;
        types.select("rust");

        let mut walker_builder = WalkBuilder::new(first_root);
        walker_builder
            .sort_by_file_path(Path::cmp)
            .types(types.build().context("Failed to build types")?)
            .follow_links(options.follow_links);
        for root in rest {
            walker_builder.add(root);
        }

        for entry in walker_builder.build() {
            let entry = entry.context("failed to walk input directory")?;
            if entry.file_type().map_or(false, |file_type| file_type.is_file()) {
                files.push(entry.into_path());
            }
        }
    }

    Ok(files)
}

/// Parse all source files into one merged `ParsedData`. Parse failures are
/// collected per file so every broken input gets reported in a single run.
pub fn parse_sources(files: &[PathBuf]) -> anyhow::Result<ParsedData> {
    let mut parsed_data = ParsedData::default();
    for file in files {
        debug!("parsing {}", file.display());
        let source = fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        match headshare_core::parser::parse(&source) {
            Ok(data) => parsed_data.merge(data),
            Err(error) => parsed_data.errors.push(FileError {
                file_name: file.display().to_string(),
                error,
            }),
        }
    }
    Ok(parsed_data)
}
