//! Configuration for the clientbank command.
//!
//! Settings are read in layers, later ones winning:
//!
//! 1. `defaults/clientbank.default.toml`, embedded into the binary
//! 2. `clientbank.toml` in the working directory, when there is one
//! 3. a file named on the command line
//! 4. the output format given on the command line
//!
//! [`Loader`] stacks the layers and deserializes the result into
//! [`ClientbankConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

use crate::formats::OutputFormat;

const DEFAULT_TOML: &str = include_str!("../defaults/clientbank.default.toml");

/// Picked up from the working directory without being asked for
pub const LOCAL_CONFIG_FILE: &str = "clientbank.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ClientbankConfig {
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive for the log subscriber when `RUST_LOG` is unset
    pub level: String,
}

/// Layers user settings over the built-in defaults
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer [`LOCAL_CONFIG_FILE`] from `dir` if it is there
    pub fn with_directory(self, dir: impl AsRef<Path>) -> Self {
        self.add_toml(&dir.as_ref().join(LOCAL_CONFIG_FILE), false)
    }

    /// Layer a TOML file. A missing file is an error at [`Loader::build`].
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.add_toml(path.as_ref(), true)
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Result<Self, ConfigError> {
        self.builder = self.builder.set_override("output.format", format.name())?;
        Ok(self)
    }

    fn add_toml(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn build(self) -> Result<ClientbankConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<ClientbankConfig, ConfigError> {
    Loader::new().build()
}
