//! Generated output writing.
use std::io;
use std::path::Path;

use anyhow::Context;
use headshare_core::Bindings;
use log::{error, info};

/// Where generated declarations go.
pub enum Output<'a> {
    File(&'a Path),
    Stdout,
}

/// Write the bindings out. Returns the process exit code: verify failures
/// map to 2 so build scripts can tell them apart from hard errors.
pub fn write_bindings(
    bindings: &Bindings,
    destination: Output<'_>,
    verify: bool,
) -> anyhow::Result<i32> {
    match destination {
        Output::File(path) => {
            let changed = bindings
                .write_to_file(path)
                .with_context(|| format!("failed to write output: {}", path.display()))?;
            if verify && changed {
                error!("declarations changed: {}", path.display());
                return Ok(2);
            }
            if !changed {
                info!("skipped writing {}: no changes", path.display());
            }
            Ok(0)
        }
        Output::Stdout => {
            bindings
                .write(io::stdout().lock())
                .context("failed to write to stdout")?;
            Ok(0)
        }
    }
}
