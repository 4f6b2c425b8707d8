use std::io::{self, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

mod c;
mod cxx;
mod cython;

pub use c::C;
pub use cxx::Cxx;
pub use cython::Cython;

use crate::bindings::Bindings;
use crate::config::Config;

/// All supported output languages.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, EnumString, Display)]
pub enum SupportedLanguage {
    #[strum(serialize = "c")]
    C,
    #[strum(serialize = "cxx", to_string = "c++")]
    Cxx,
    #[strum(serialize = "cython")]
    Cython,
}

impl Serialize for SupportedLanguage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_string().as_str())
    }
}

impl<'de> Deserialize<'de> for SupportedLanguage {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        SupportedLanguage::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Renders finished bindings into one output language.
///
/// A unique writer instance is constructed per generation run, so
/// implementations are free to keep mutable state.
pub trait Language {
    fn generate(&mut self, writable: &mut dyn Write, bindings: &Bindings) -> io::Result<()>;
}

/// Get the writer for the configured output language.
pub(crate) fn writer_for(config: &Config) -> Box<dyn Language> {
    match config.language {
        SupportedLanguage::C => Box::new(C::new(config.clone())),
        SupportedLanguage::Cxx => Box::new(Cxx::new(config.clone())),
        SupportedLanguage::Cython => Box::new(Cython::new(config.clone())),
    }
}

/// Output text assembled as blocks separated by one blank line, with a
/// single trailing newline. Byte-stable output falls out of this invariant;
/// a block that should read as two blank lines away from its successor (the
/// verbatim header) simply ends with its own `\n`.
pub(crate) struct Blocks {
    blocks: Vec<String>,
}

impl Blocks {
    pub(crate) fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    pub(crate) fn push(&mut self, block: impl Into<String>) {
        self.blocks.push(block.into());
    }

    pub(crate) fn write(self, writable: &mut dyn Write) -> io::Result<()> {
        writeln!(writable, "{}", self.blocks.join("\n\n"))
    }
}

/// Append doc comment lines with the language's line-comment leader.
pub(crate) fn push_comments(out: &mut String, comments: &[String], indent: &str, leader: &str) {
    for line in comments {
        out.push_str(indent);
        if line.is_empty() {
            out.push_str(leader);
        } else {
            out.push_str(leader);
            out.push(' ');
            out.push_str(line);
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_strings_round_trip() {
        assert_eq!(SupportedLanguage::from_str("c").unwrap(), SupportedLanguage::C);
        assert_eq!(
            SupportedLanguage::from_str("c++").unwrap(),
            SupportedLanguage::Cxx
        );
        assert_eq!(
            SupportedLanguage::from_str("cxx").unwrap(),
            SupportedLanguage::Cxx
        );
        assert_eq!(SupportedLanguage::Cxx.to_string(), "c++");
        assert!(SupportedLanguage::from_str("rust").is_err());
    }

    #[test]
    fn blocks_join_with_blank_lines() {
        let mut blocks = Blocks::new();
        blocks.push("first");
        blocks.push("second\nline");
        let mut out = Vec::new();
        blocks.write(&mut out).unwrap();
        assert_eq!(out, b"first\n\nsecond\nline\n");
    }
}
