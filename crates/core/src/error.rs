// crates/core/src/error.rs
//! Error types shared across mcsync crates

use thiserror::Error;

/// Result type for core domain operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors produced by the pure domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Identifier does not match the card filename grammar
    #[error(
        "invalid target name '{name}': expected <CardName>-<Channel>.<ext> \
         with channel 1-8 and a known card extension"
    )]
    InvalidTargetFormat { name: String },
}
