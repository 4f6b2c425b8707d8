use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use anyhow::{anyhow, bail, Context};
use once_cell::sync::Lazy;

use headshare_core::config::Style;
use headshare_core::language::SupportedLanguage;
use headshare_core::Config;

static TESTS_FOLDER_PATH: Lazy<PathBuf> =
    Lazy::new(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/tests"));

static INIT: Once = Once::new();

fn init_log() {
    INIT.call_once(|| {
        if let Ok(logger) = flexi_logger::Logger::try_with_env_or_str("warn") {
            let _ = logger.start();
        }
    });
}

/// Derive the config variant from the expectation's file name, which mirrors
/// the naming of a generated-output directory:
/// `output[.tag|.both][.compat].{c,hpp,pyx}`.
fn apply_variant(config: &mut Config, file_name: &str) -> anyhow::Result<()> {
    if file_name.contains(".tag.") {
        config.style = Style::Tag;
    } else if file_name.contains(".both.") {
        config.style = Style::Both;
    }
    if file_name.contains(".compat.") {
        config.cpp_compat = true;
    }
    config.language = match Path::new(file_name).extension().and_then(|ext| ext.to_str()) {
        Some("c") => SupportedLanguage::C,
        Some("hpp") => SupportedLanguage::Cxx,
        Some("pyx") => SupportedLanguage::Cython,
        other => bail!("unrecognized expectation extension: {other:?}"),
    };
    Ok(())
}

/// Performs a snapshot test for the given parameters
///
/// The test folder holds `input.rs`, an optional `headshare.toml`, and one
/// expectation file per variant. Generated output must match the
/// expectation byte for byte; run with `UPDATE_EXPECT=1` to bless changes.
fn check(test_name: &str, file_name: &str) -> anyhow::Result<()> {
    init_log();

    let case_dir = TESTS_FOLDER_PATH.join(test_name);
    let rust_input = fs::read_to_string(case_dir.join("input.rs"))
        .with_context(|| format!("failed to read input for `{test_name}`"))?;

    let config_path = case_dir.join("headshare.toml");
    let mut config = if config_path.is_file() {
        Config::from_file(&config_path)
            .with_context(|| format!("failed to read configuration for `{test_name}`"))?
    } else {
        Config::default()
    };
    apply_variant(&mut config, file_name)?;

    let parsed_data = headshare_core::parser::parse(&rust_input)
        .map_err(|err| anyhow!("parsing failed for `{test_name}`: {err}"))?;
    let bindings = headshare_core::generate(config, parsed_data)?;

    let mut output = Vec::new();
    bindings.write(&mut output)?;
    let output = String::from_utf8(output).context("generated output is not utf-8")?;

    let expectation_path = case_dir.join(file_name);
    if env::var("UPDATE_EXPECT").is_ok() {
        fs::write(&expectation_path, &output)?;
        return Ok(());
    }

    let expected = fs::read_to_string(&expectation_path)
        .with_context(|| format!("failed to read expectation `{test_name}/{file_name}`"))?;
    if expected != output {
        bail!(
            "`{test_name}/{file_name}` does not match; run with UPDATE_EXPECT=1 to bless\n\
             --- expected\n{expected}\n--- actual\n{output}"
        );
    }
    Ok(())
}

#[test]
fn excluded_monomorph_with_external_definition() -> anyhow::Result<()> {
    check("excluded_monomorph", "output.compat.c")?;
    check("excluded_monomorph", "output.tag.compat.c")
}

#[test]
fn primitive_struct() -> anyhow::Result<()> {
    check("primitive_struct", "output.c")?;
    check("primitive_struct", "output.tag.c")?;
    check("primitive_struct", "output.both.c")?;
    check("primitive_struct", "output.hpp")?;
    check("primitive_struct", "output.pyx")
}

#[test]
fn c_enums() -> anyhow::Result<()> {
    check("c_enums", "output.c")?;
    check("c_enums", "output.tag.c")?;
    check("c_enums", "output.pyx")
}

#[test]
fn type_aliases() -> anyhow::Result<()> {
    check("type_aliases", "output.c")
}

#[test]
fn generic_struct_instantiation() -> anyhow::Result<()> {
    check("generic_struct_instantiation", "output.c")
}

#[test]
fn opaque_forward_declarations() -> anyhow::Result<()> {
    check("opaque_forward_declarations", "output.c")?;
    check("opaque_forward_declarations", "output.tag.c")
}

#[test]
fn include_guard_and_trailer() -> anyhow::Result<()> {
    check("include_guard_and_trailer", "output.compat.c")
}
