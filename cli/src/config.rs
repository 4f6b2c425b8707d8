//! Configuration loading and CLI overrides.
use std::path::Path;

use anyhow::Context;
use headshare_core::config::Style;
use headshare_core::language::SupportedLanguage;
use headshare_core::Config;

use crate::args::{Args, AvailableLanguage, AvailableStyle};

/// Load the configuration: the explicit `--config-file` if given, otherwise
/// whatever `headshare.toml` sits next to the first input.
pub fn load_config(config_file: Option<&Path>, first_input: &Path) -> anyhow::Result<Config> {
    match config_file {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("unable to read configuration file {}", path.display())),
        None => {
            let root = if first_input.is_dir() {
                first_input
            } else {
                first_input.parent().unwrap_or_else(|| Path::new("."))
            };
            Config::from_root_or_default(root).context("unable to read configuration file")
        }
    }
}

/// Overrides any configuration values with provided arguments
pub fn override_configuration(mut config: Config, options: &Args) -> Config {
    if let Some(language) = options.language {
        config.language = match language {
            AvailableLanguage::C => SupportedLanguage::C,
            AvailableLanguage::Cxx => SupportedLanguage::Cxx,
            AvailableLanguage::Cython => SupportedLanguage::Cython,
        };
    }

    if let Some(style) = options.style {
        config.style = match style {
            AvailableStyle::Type => Style::Type,
            AvailableStyle::Tag => Style::Tag,
            AvailableStyle::Both => Style::Both,
        };
    }

    if options.cpp_compat {
        config.cpp_compat = true;
    }

    config
}

pub fn store_config(config: &Config, file_path: Option<&Path>) -> anyhow::Result<()> {
    config
        .store(file_path)
        .context("failed to write new configuration file")
}
