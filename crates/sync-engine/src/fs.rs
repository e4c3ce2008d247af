// crates/sync-engine/src/fs.rs
//! Local filesystem side of the timestamp oracle

use crate::error::SyncResult;
use filetime::FileTime;
use mcsync_core::unix_seconds;
use std::io;
use std::path::Path;

/// Local file mtime in whole seconds since the epoch.
///
/// `None` means "no local copy yet", a state the conflict resolver treats
/// as first-sync, not as an older timestamp.
pub fn local_modified_time(path: &Path) -> SyncResult<Option<i64>> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(Some(unix_seconds(meta.modified()?))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Rewrites the file's access and modification times to `epoch` seconds.
///
/// Reconciliation is the last step of a transfer; callers must only invoke
/// this once the data is fully on disk.
pub fn set_file_times(path: &Path, epoch: i64) -> SyncResult<()> {
    let time = FileTime::from_unix_time(epoch, 0);
    filetime::set_file_times(path, time, time)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_has_no_time() {
        let dir = tempfile::tempdir().unwrap();
        let time = local_modified_time(&dir.path().join("absent.bin")).unwrap();
        assert_eq!(time, None);
    }

    #[test]
    fn test_set_and_read_times_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SLUS-21274-1.bin");
        std::fs::write(&path, b"card image").unwrap();

        set_file_times(&path, 946_684_800).unwrap();
        assert_eq!(local_modified_time(&path).unwrap(), Some(946_684_800));
    }

    #[test]
    fn test_times_are_whole_seconds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.bin");
        std::fs::write(&path, b"x").unwrap();

        set_file_times(&path, 1_700_000_000).unwrap();
        let read_back = local_modified_time(&path).unwrap().unwrap();
        assert_eq!(read_back, 1_700_000_000);
    }

    #[test]
    fn test_set_times_on_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(set_file_times(&dir.path().join("absent.bin"), 0).is_err());
    }
}
