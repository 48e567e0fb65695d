//! I/O adapter configuration.
//!
//! An [`IoConfig`] is read from one TOML file and turned into live
//! adapters with [`IoConfig::build_dispatcher`] and
//! [`IoConfig::build_input`].
//!
//! ```toml
//! [input]
//! path = "cases.txt"
//!
//! [[outputs]]
//! target = "console"
//!
//! [[outputs]]
//! target = "file"
//! path = "out.txt"
//! append = true
//! order = 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{
    BufferedOutputConsumer, ConfigError, FileInputProvider, IoError, OutputConsumer,
    OutputDispatcher,
};

/// Where an output goes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputTarget {
    /// Standard output.
    Console,
    /// A file; requires `path`.
    File,
}

/// One declared output consumer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputDef {
    /// Sink kind.
    pub target: OutputTarget,

    /// File path (file target only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Append instead of truncating (file target only).
    #[serde(default)]
    pub append: bool,

    /// Order. Default: 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl OutputDef {
    /// A console output.
    #[must_use]
    pub fn console() -> Self {
        Self {
            target: OutputTarget::Console,
            path: None,
            append: false,
            order: None,
        }
    }

    /// A file output.
    pub fn file(path: impl Into<PathBuf>, append: bool) -> Self {
        Self {
            target: OutputTarget::File,
            path: Some(path.into()),
            append,
            order: None,
        }
    }

    fn build(&self) -> Result<Box<dyn OutputConsumer>, IoError> {
        let order = self.order.unwrap_or(lcx_types::DEFAULT_ORDER);
        match (self.target, &self.path) {
            (OutputTarget::Console, _) => {
                Ok(Box::new(BufferedOutputConsumer::console().with_order(order)))
            }
            (OutputTarget::File, Some(path)) => {
                let consumer = if self.append {
                    BufferedOutputConsumer::append(path)?
                } else {
                    BufferedOutputConsumer::create(path)?
                };
                Ok(Box::new(consumer.with_order(order)))
            }
            // Rejected by IoConfig::validate.
            (OutputTarget::File, None) => Err(IoError::open(
                PathBuf::new(),
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "file output without path",
                ),
            )),
        }
    }
}

/// Declared input source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputDef {
    /// Input file path.
    pub path: PathBuf,
}

/// Top-level I/O configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IoConfig {
    /// Input source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<InputDef>,

    /// Output consumers.
    pub outputs: Vec<OutputDef>,
}

impl IoConfig {
    /// Reads, parses and validates the TOML file at `path`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ReadFile`] if the file cannot be read (including
    /// when it does not exist), [`ConfigError::ParseToml`] if it is
    /// malformed, [`ConfigError::Invalid`] if validation fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config = Self::from_toml(&text).map_err(|e| ConfigError::parse_toml(path, e))?;
        config.validate()?;
        debug!(path = %path.display(), outputs = config.outputs.len(), "loaded io config");
        Ok(config)
    }

    /// Parses configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the content is malformed.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serializes configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if a file output has no path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, def) in self.outputs.iter().enumerate() {
            if def.target == OutputTarget::File && def.path.is_none() {
                return Err(ConfigError::Invalid(format!(
                    "outputs[{i}]: file target requires 'path'"
                )));
            }
        }
        Ok(())
    }

    /// Builds a dispatcher with one consumer per declared output.
    ///
    /// # Errors
    ///
    /// [`IoError::Open`] if an output file cannot be opened.
    pub fn build_dispatcher(&self) -> Result<OutputDispatcher, IoError> {
        let mut dispatcher = OutputDispatcher::new();
        for def in &self.outputs {
            dispatcher.register(def.build()?);
        }
        Ok(dispatcher)
    }

    /// Opens the declared input, if any.
    ///
    /// # Errors
    ///
    /// [`IoError::Open`] if the input file cannot be opened.
    pub fn build_input(&self) -> Result<Option<FileInputProvider>, IoError> {
        self.input
            .as_ref()
            .map(|def| FileInputProvider::open(&def.path))
            .transpose()
    }
}
