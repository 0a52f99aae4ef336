//! Structured error types for adboard-core.
//!
//! Binary crates (adboard-cli) use `anyhow` for convenience,
//! but library consumers get structured, composable errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for adboard-core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Config file could not be read
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    /// Config file is not valid TOML for `AdboardConfig`
    #[error("Failed to parse config file {path:?} (invalid TOML): {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Explicitly requested config file does not exist
    #[error("Config not found at {path:?}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration value is invalid
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for adboard-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
