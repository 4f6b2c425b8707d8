use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::language::SupportedLanguage;

/// The default name for the configuration file
pub const DEFAULT_CONFIG_FILE_NAME: &str = "headshare.toml";

/// How C structs and enums are exposed to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
pub enum Style {
    /// `typedef struct { ... } Name;`
    #[default]
    #[strum(serialize = "type")]
    Type,
    /// `struct Name { ... };` with the tag required at every use site
    #[strum(serialize = "tag")]
    Tag,
    /// `typedef struct Name { ... } Name;`
    #[strum(serialize = "both")]
    Both,
}

impl Serialize for Style {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_string().as_str())
    }
}

impl<'de> Deserialize<'de> for Style {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Style::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Controls which declarations make it into the output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Names kept even when nothing in the output references them.
    pub include: Vec<String>,
    /// Names whose definition is never emitted. References keep the name;
    /// the consumer supplies the definition, typically through `header`.
    pub exclude: Vec<String>,
    /// Prefix applied to every emitted type name. Function names are linker
    /// symbols and stay untouched.
    pub prefix: Option<String>,
}

impl ExportConfig {
    pub(crate) fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == name)
    }

    pub(crate) fn rename(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{name}"),
            None => name.to_string(),
        }
    }
}

/// The parameters that are used to configure the behaviour of headshare
/// from the configuration file `headshare.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub language: SupportedLanguage,
    /// Only affects the C writer; C++ and Cython each have a single natural
    /// declaration form.
    pub style: Style,
    /// Wrap generated C functions in `extern "C"` guards for C++ consumers.
    pub cpp_compat: bool,
    /// Verbatim text placed at the top of the output.
    pub header: Option<String>,
    /// Verbatim text placed at the bottom of the output.
    pub trailer: Option<String>,
    pub include_guard: Option<String>,
    pub autogen_warning: Option<String>,
    /// Replaces the default system include list when set.
    pub sys_includes: Option<Vec<String>>,
    /// Additional quoted includes.
    pub includes: Vec<String>,
    pub no_includes: bool,
    /// C++ only: wrap declarations in this namespace.
    pub namespace: Option<String>,
    /// Emit doc comments into the output.
    pub documentation: bool,
    pub export: ExportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            language: SupportedLanguage::C,
            style: Style::default(),
            cpp_compat: false,
            header: None,
            trailer: None,
            include_guard: None,
            autogen_warning: None,
            sys_includes: None,
            includes: Vec::new(),
            no_includes: false,
            namespace: None,
            documentation: true,
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config, io::Error> {
        let config_string = fs::read_to_string(path)?;
        toml::from_str(&config_string).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Load the configuration file found in `root`, or fall back to the
    /// defaults when there is none.
    pub fn from_root_or_default(root: impl AsRef<Path>) -> Result<Config, io::Error> {
        let path = root.as_ref().join(DEFAULT_CONFIG_FILE_NAME);
        if path.is_file() {
            Config::from_file(path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn store(&self, file_path: Option<&Path>) -> Result<(), io::Error> {
        let file_path = file_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE_NAME));

        // Fail if trying to overwrite an existing config file
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(file_path)?;

        let config_output = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        io::Write::write_all(&mut file, config_output.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(
            r#"
            language = "c"
            style = "tag"
            cpp_compat = true
            include_guard = "MY_LIB_H"
            includes = ["defs.h"]

            header = """
            typedef uint64_t Handle;"""

            [export]
            exclude = ["Handle"]
            prefix = "Lib"
            "#,
        )
        .unwrap();

        assert_eq!(config.language, SupportedLanguage::C);
        assert_eq!(config.style, Style::Tag);
        assert!(config.cpp_compat);
        assert_eq!(config.include_guard.as_deref(), Some("MY_LIB_H"));
        assert!(config.export.is_excluded("Handle"));
        assert_eq!(config.export.rename("Handle"), "LibHandle");
    }

    #[test]
    fn defaults_apply_for_missing_fields() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.documentation);
        assert_eq!(config.style, Style::Type);
    }

    #[test]
    fn style_strings_round_trip() {
        for style in [Style::Type, Style::Tag, Style::Both] {
            assert_eq!(Style::from_str(&style.to_string()).unwrap(), style);
        }
        assert!(Style::from_str("typedef").is_err());
    }
}
