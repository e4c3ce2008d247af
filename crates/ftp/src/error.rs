// crates/ftp/src/error.rs
//! Error types for FTP operations

use crate::reply::Reply;
use thiserror::Error;

/// Result type for FTP operations
pub type FtpResult<T> = Result<T, FtpError>;

/// Errors that can occur while talking to the FTP server
#[derive(Debug, Error)]
pub enum FtpError {
    /// Could not establish the control connection
    #[error("failed to connect to {host}: {source}")]
    Connect {
        host: String,
        source: std::io::Error,
    },

    /// Server rejected the credentials
    #[error("login rejected for user '{user}': {reply}")]
    LoginRejected { user: String, reply: Reply },

    /// Server answered a command with a code outside the accepted set
    #[error("unexpected reply to {command}: {reply}")]
    UnexpectedReply { command: String, reply: Reply },

    /// Control-channel line did not start with a 3-digit reply code
    #[error("malformed reply line: {line:?}")]
    MalformedReply { line: String },

    /// PASV reply did not carry a `(h1,h2,h3,h4,p1,p2)` address
    #[error("malformed passive-mode address: {text:?}")]
    MalformedPassiveAddress { text: String },

    /// MDTM reply was not a 14-digit `YYYYMMDDHHMMSS` timestamp
    #[error("malformed modification time {text:?}: expected YYYYMMDDHHMMSS")]
    MalformedTimestamp { text: String },

    /// I/O error on the control or data connection
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
