//! Error types for I/O adapters and their configuration.

use lcx_types::ErrorCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of an underlying sink or source.
#[derive(Debug, Error)]
pub enum IoError {
    /// The resource could not be opened.
    #[error("failed to open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading from the source failed.
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),

    /// Writing to the sink failed.
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),

    /// Flushing the sink failed.
    #[error("failed to flush output: {0}")]
    Flush(#[source] io::Error),

    /// Releasing the resource failed. The resource is released anyway.
    #[error("failed to close: {0}")]
    Close(#[source] io::Error),

    /// The consumer was already closed.
    #[error("output consumer is closed")]
    Closed,
}

impl IoError {
    /// Creates an open error.
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    fn source_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Open { source, .. } => Some(source.kind()),
            Self::Read(e) | Self::Write(e) | Self::Flush(e) | Self::Close(e) => Some(e.kind()),
            Self::Closed => None,
        }
    }
}

impl ErrorCode for IoError {
    fn code(&self) -> &'static str {
        match self {
            Self::Open { .. } => "IO_OPEN",
            Self::Read(_) => "IO_READ",
            Self::Write(_) => "IO_WRITE",
            Self::Flush(_) => "IO_FLUSH",
            Self::Close(_) => "IO_CLOSE",
            Self::Closed => "IO_CLOSED",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(
            self.source_kind(),
            Some(io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
        )
    }
}

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config file '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The merged configuration is inconsistent.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Creates a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse TOML error.
    pub fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ParseToml {
            path: path.into(),
            source,
        }
    }
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "CONFIG_READ_FILE",
            Self::ParseToml { .. } => "CONFIG_PARSE_TOML",
            Self::Invalid(_) => "CONFIG_INVALID",
        }
    }

    fn is_recoverable(&self) -> bool {
        // The file can be fixed and reloaded.
        true
    }
}
