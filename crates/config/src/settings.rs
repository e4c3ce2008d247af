// crates/config/src/settings.rs
//! Run settings
//!
//! One immutable value struct carries everything a run needs. It is built
//! from the command line exactly once and passed down by reference, so no
//! component can flip an option mid-run.

use crate::error::{ConfigError, ConfigResult};
use std::path::PathBuf;

/// Which local naming layout to use for synced card images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalLayout {
    /// `<CardName>-<Channel>.<local-ext>` directly under the sync root
    #[default]
    Structured,
    /// Legacy layout: remote directory and filename flattened into one name
    Flat,
}

/// Immutable settings for one sync run
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// FTP server address, `host` or `host:port`
    pub ftp_host: String,
    /// Local directory the card images sync into
    pub local_root: PathBuf,
    /// Path of the target-list file
    pub targets_file: PathBuf,
    /// Local naming layout
    pub layout: LocalLayout,
    /// Plain output mode: summary lines only, no progress bar
    pub plain_output: bool,
}

impl SyncSettings {
    /// Checks settings that can be rejected before any I/O starts.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.ftp_host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "ftp host must not be empty".to_string(),
            ));
        }

        if self.local_root.exists() && !self.local_root.is_dir() {
            return Err(ConfigError::ValidationError(format!(
                "local root {} exists but is not a directory",
                self.local_root.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SyncSettings {
        SyncSettings {
            ftp_host: "192.168.1.99".to_string(),
            local_root: PathBuf::from("."),
            targets_file: PathBuf::from("targets.json"),
            layout: LocalLayout::Structured,
            plain_output: false,
        }
    }

    #[test]
    fn test_validate_accepts_sane_settings() {
        assert!(settings().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let mut bad = settings();
        bad.ftp_host = "   ".to_string();
        assert!(matches!(
            bad.validate().unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_validate_rejects_file_as_local_root() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut bad = settings();
        bad.local_root = file.path().to_path_buf();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_missing_local_root() {
        // A root that does not exist yet is fine; target construction
        // creates the directory tree.
        let mut ok = settings();
        ok.local_root = PathBuf::from("/tmp/mcsync-not-created-yet");
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_layout_default_is_structured() {
        assert_eq!(LocalLayout::default(), LocalLayout::Structured);
    }
}
