//! Error types for fixture generation.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for fixture operations.
pub type MixResult<T> = Result<T, MixError>;

/// Errors that can occur while loading, mixing or storing fixtures.
#[derive(Debug, Error)]
pub enum MixError {
    /// Input is not a mono 16-bit integer PCM WAV file.
    #[error("unsupported audio format in '{}': {message}", path.display())]
    Format {
        /// Offending file.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// The request cannot be satisfied as configured.
    #[error("invalid configuration: {message}")]
    Configuration {
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MixError {
    /// Creates a format error for `path`.
    pub fn format(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            MixError::Format { .. } => "MIX_001",
            MixError::Configuration { .. } => "MIX_002",
            MixError::Io(_) => "MIX_003",
        }
    }

    /// Returns true for errors raised before any audio was synthesized.
    pub fn is_configuration(&self) -> bool {
        matches!(self, MixError::Configuration { .. })
    }
}
