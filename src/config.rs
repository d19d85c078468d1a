//! Configuration loading for the parcom command-line tool
//!
//! Settings are TOML. The file `defaults/parcom.default.toml` is compiled in
//! and always forms the bottom layer, so every key has a value before any user
//! file is read.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, Value};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/parcom.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ParcomConfig {
    pub output: OutputConfig,
    pub parse: ParseConfig,
}

/// How parse results are printed
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Name of a registered format
    pub format: String,
    /// Treeviz label truncation width, in characters
    pub label_width: usize,
}

/// What is parsed and how input is prepared
#[derive(Debug, Clone, Deserialize)]
pub struct ParseConfig {
    pub grammar: String,
    /// Rule to use instead of the grammar's root
    #[serde(default)]
    pub rule: Option<String>,
    pub trim_trailing_newline: bool,
}

impl ParseConfig {
    /// Apply the input preparation settings to `input`
    pub fn prepare<'a>(&self, input: &'a str) -> &'a str {
        if !self.trim_trailing_newline {
            return input;
        }
        input
            .strip_suffix("\r\n")
            .or_else(|| input.strip_suffix('\n'))
            .unwrap_or(input)
    }
}

/// File picked up from the working directory when present
pub const LOCAL_CONFIG: &str = "parcom.toml";

/// Stacks TOML sources over the embedded defaults. Later layers win.
///
/// The CLI stacks, in order: defaults, [`LOCAL_CONFIG`], the `--config` file,
/// and finally one override per flag given on the command line.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Add a file that must exist; a missing file fails [`Loader::build`]
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Add a file that is skipped when it does not exist
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Replace one dotted key, e.g. `output.format`
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<Value>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<ParcomConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
