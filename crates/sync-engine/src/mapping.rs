// crates/sync-engine/src/mapping.rs
//! Naming strategies: logical target name to remote and local paths
//!
//! Both strategies validate against the card filename grammar first, so a
//! malformed identifier can never reach the transport layer. Remote paths
//! use `/` separators regardless of platform; local paths are real
//! filesystem paths under the sync root.

use crate::error::SyncResult;
use mcsync_core::TargetName;
use std::path::{Path, PathBuf};

/// A naming strategy, selected once at startup
pub trait MappingStrategy: Send + Sync {
    /// Remote path for `name`, rooted at the family's remote root
    fn map_to_remote(&self, name: &str) -> SyncResult<String>;

    /// Local path for `name` under `local_root`
    fn map_to_local(&self, name: &str, local_root: &Path) -> SyncResult<PathBuf>;
}

/// Canonical strategy: the remote keeps one directory per virtual card
/// (`PS2/SLUS-21274-1/SLUS-21274-1.mc2`), the local side is a flat file
/// with the family's local extension (`SLUS-21274-1.bin`).
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredMapping;

impl MappingStrategy for StructuredMapping {
    fn map_to_remote(&self, name: &str) -> SyncResult<String> {
        let parsed = TargetName::parse(name)?;
        Ok(format!(
            "{}/{}/{}",
            parsed.family().remote_root(),
            parsed.stem(),
            parsed.as_str()
        ))
    }

    fn map_to_local(&self, name: &str, local_root: &Path) -> SyncResult<PathBuf> {
        let parsed = TargetName::parse(name)?;
        Ok(local_root.join(parsed.local_file_name()))
    }
}

/// Legacy strategy: remote mapping is identical, but the local filename
/// flattens the remote card directory into the name itself,
/// `<card dir>_<card stem>.bin`, always with a `.bin` extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatMapping;

impl MappingStrategy for FlatMapping {
    fn map_to_remote(&self, name: &str) -> SyncResult<String> {
        StructuredMapping.map_to_remote(name)
    }

    fn map_to_local(&self, name: &str, local_root: &Path) -> SyncResult<PathBuf> {
        let parsed = TargetName::parse(name)?;
        let stem = parsed.stem();
        Ok(local_root.join(format!("{stem}_{stem}.bin")))
    }
}
