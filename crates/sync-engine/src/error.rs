// crates/sync-engine/src/error.rs
//! Error types for sync operations

use mcsync_core::CoreError;
use mcsync_ftp::FtpError;
use thiserror::Error;

/// Result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while deciding and transferring targets
#[derive(Debug, Error)]
pub enum SyncError {
    /// Identifier failed the card filename grammar; aborts the run before
    /// any network activity
    #[error(transparent)]
    InvalidTarget(#[from] CoreError),

    /// Remote timestamp or size query failed. Deliberately distinct from
    /// "remote is older": a missing remote file fails the target, it never
    /// silently resolves to a transfer direction.
    #[error("remote query failed for {path}: {source}")]
    RemoteQuery {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Chunked transfer failed mid-flight; the partial local file keeps
    /// its old timestamp
    #[error("transfer of {path} failed: {source}")]
    Transfer {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Transport-level failure
    #[error(transparent)]
    Ftp(#[from] FtpError),

    /// Local filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Run interrupted; the in-flight target is abandoned un-reconciled
    #[error("sync cancelled")]
    Cancelled,
}

impl SyncError {
    /// Wraps a failure that happened during a remote metadata query.
    /// Cancellation passes through untouched so the orchestrator still
    /// sees it.
    pub(crate) fn in_query(self, path: &str) -> Self {
        match self {
            Self::Cancelled => Self::Cancelled,
            other => Self::RemoteQuery {
                path: path.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Wraps a failure that happened during a chunked transfer.
    pub(crate) fn in_transfer(self, path: &str) -> Self {
        match self {
            Self::Cancelled => Self::Cancelled,
            other => Self::Transfer {
                path: path.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// True when the failure is scoped to one target and the run continues
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::RemoteQuery { .. } | Self::Transfer { .. })
    }
}
