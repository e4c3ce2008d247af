// crates/config/src/error.rs
//! Error types for run configuration

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while assembling a run's configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// FTP credentials were not provided by the environment
    #[error(
        "device credentials missing: {user_var} and {password_var} must be \
         set in the environment"
    )]
    MissingCredential {
        user_var: String,
        password_var: String,
    },

    /// Failed to read the target-list file
    #[error("failed to read target list at {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse the target-list file
    #[error("failed to parse target list at {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Settings contain an invalid value
    #[error("invalid settings: {0}")]
    ValidationError(String),
}
