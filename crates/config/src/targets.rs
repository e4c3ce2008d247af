// crates/config/src/targets.rs
//! Target-list loading
//!
//! The set of card images to sync lives in a JSON file,
//! `{"targets": ["SLUS-21274-1.mc2", ...]}`. Order is significant: the
//! engine processes targets strictly in file order. The list is read once,
//! before the FTP session opens.

use crate::error::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::Path;

/// Default target-list filename, looked up in the working directory
pub const DEFAULT_TARGETS_FILE: &str = "targets.json";

/// Parsed target-list file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetsFile {
    /// Identifiers in sync order; a file without the key is an empty run
    #[serde(default)]
    pub targets: Vec<String>,
}

impl TargetsFile {
    /// Reads and parses the target list at `path`.
    ///
    /// A missing or unreadable file and malformed JSON are both fatal: the
    /// list is assumed pre-validated, so silently syncing nothing would
    /// hide an operator mistake.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed: Self =
            serde_json::from_str(&raw).map_err(|source| ConfigError::ParseError {
                path: path.to_path_buf(),
                source,
            })?;

        log::debug!("loaded {} targets from {}", parsed.targets.len(), path.display());
        Ok(parsed)
    }
}
