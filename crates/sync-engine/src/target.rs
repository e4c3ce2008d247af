// crates/sync-engine/src/target.rs
//! Sync targets: one logical name bound to its resolved locations

use crate::error::SyncResult;
use crate::mapping::MappingStrategy;
use std::path::{Path, PathBuf};

/// One file to sync, resolved once before any network activity.
///
/// Construction also creates the local parent directory tree, so transfer
/// code never has to check for missing directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    name: String,
    remote_path: String,
    local_path: PathBuf,
}

impl SyncTarget {
    /// Resolves `name` through `strategy` under `local_root`.
    pub fn new(name: &str, local_root: &Path, strategy: &dyn MappingStrategy) -> SyncResult<Self> {
        let remote_path = strategy.map_to_remote(name)?;
        let local_path = strategy.map_to_local(name, local_root)?;

        if let Some(parent) = local_path.parent() {
            // create-if-absent; an existing directory is not an error
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self {
            name: name.to_string(),
            remote_path,
            local_path,
        })
    }

    /// Builds the full ordered target list.
    ///
    /// Fails on the first malformed name: the list is assumed
    /// pre-validated, so one bad entry aborts the run rather than being
    /// silently skipped.
    pub fn build_all(
        names: &[String],
        local_root: &Path,
        strategy: &dyn MappingStrategy,
    ) -> SyncResult<Vec<Self>> {
        names
            .iter()
            .map(|name| Self::new(name, local_root, strategy))
            .collect()
    }

    /// The logical identifier this target was built from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full remote path, `/`-separated
    pub fn remote_path(&self) -> &str {
        &self.remote_path
    }

    /// Full local path under the sync root
    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    /// Filename component of the remote path
    pub fn remote_file_name(&self) -> &str {
        self.remote_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.remote_path)
    }

    /// Filename component of the local path
    pub fn local_file_name(&self) -> String {
        self.local_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use crate::mapping::StructuredMapping;

    #[test]
    fn test_new_resolves_both_paths() {
        let dir = tempfile::tempdir().unwrap();
        let target = SyncTarget::new("SLUS-21274-1.mc2", dir.path(), &StructuredMapping).unwrap();

        assert_eq!(target.name(), "SLUS-21274-1.mc2");
        assert_eq!(target.remote_path(), "PS2/SLUS-21274-1/SLUS-21274-1.mc2");
        assert_eq!(target.local_path(), dir.path().join("SLUS-21274-1.bin"));
        assert_eq!(target.remote_file_name(), "SLUS-21274-1.mc2");
        assert_eq!(target.local_file_name(), "SLUS-21274-1.bin");
    }

    #[test]
    fn test_new_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("cards").join("ps2");
        assert!(!root.exists());

        SyncTarget::new("SLUS-21274-1.mc2", &root, &StructuredMapping).unwrap();
        assert!(root.is_dir());
    }

    #[test]
    fn test_new_tolerates_existing_directories() {
        let dir = tempfile::tempdir().unwrap();
        SyncTarget::new("SLUS-21274-1.mc2", dir.path(), &StructuredMapping).unwrap();
        // Second resolution against the same root must not fail
        SyncTarget::new("SLUS-21274-2.mc2", dir.path(), &StructuredMapping).unwrap();
    }

    #[test]
    fn test_new_rejects_malformed_name() {
        let dir = tempfile::tempdir().unwrap();
        let err = SyncTarget::new("not-a-card", dir.path(), &StructuredMapping).unwrap_err();
        assert!(matches!(err, SyncError::InvalidTarget(_)));
    }

    #[test]
    fn test_build_all_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let names = vec![
            "SLUS-21274-1.mc2".to_string(),
            "SCUS-94163-1.mcd".to_string(),
            "SLUS-21274-2.mc2".to_string(),
        ];

        let targets = SyncTarget::build_all(&names, dir.path(), &StructuredMapping).unwrap();
        let resolved: Vec<&str> = targets.iter().map(|target| target.name()).collect();
        assert_eq!(
            resolved,
            vec!["SLUS-21274-1.mc2", "SCUS-94163-1.mcd", "SLUS-21274-2.mc2"]
        );
    }

    #[test]
    fn test_build_all_aborts_on_first_bad_entry() {
        let dir = tempfile::tempdir().unwrap();
        let names = vec![
            "SLUS-21274-1.mc2".to_string(),
            "garbage".to_string(),
            "SLUS-21274-2.mc2".to_string(),
        ];

        let err = SyncTarget::build_all(&names, dir.path(), &StructuredMapping).unwrap_err();
        assert!(matches!(err, SyncError::InvalidTarget(_)));
    }
}
