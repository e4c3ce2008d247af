// crates/config/src/lib.rs
//! Run configuration for mcsync
//!
//! Everything a run needs is assembled here, once, before the FTP session
//! opens: immutable [`SyncSettings`] built from the command line, the
//! ordered target list from `targets.json`, and the device credentials
//! from the environment.

mod credentials;
mod error;
mod settings;
mod targets;

pub use credentials::{Credentials, PASSWORD_VAR, USER_VAR};
pub use error::{ConfigError, ConfigResult};
pub use settings::{LocalLayout, SyncSettings};
pub use targets::{TargetsFile, DEFAULT_TARGETS_FILE};
