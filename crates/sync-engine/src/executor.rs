// crates/sync-engine/src/executor.rs
//! Chunked transfer execution and timestamp reconciliation

use crate::error::{SyncError, SyncResult};
use crate::fs;
use crate::observer::SyncObserver;
use crate::remote::RemoteStore;
use crate::target::SyncTarget;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Chunk size for both directions, matching the device's comfortable
/// transfer unit
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Executes the decided action for one target.
///
/// Timestamp reconciliation is strictly the last step: a stream that dies
/// mid-transfer propagates its error without rewriting the local mtime, so
/// the next run re-evaluates the target from scratch.
pub struct TransferExecutor<'a, R: RemoteStore + ?Sized> {
    remote: &'a mut R,
    observer: &'a dyn SyncObserver,
    cancel: &'a AtomicBool,
    chunk_size: usize,
}

impl<'a, R: RemoteStore + ?Sized> TransferExecutor<'a, R> {
    pub fn new(
        remote: &'a mut R,
        observer: &'a dyn SyncObserver,
        cancel: &'a AtomicBool,
        chunk_size: usize,
    ) -> Self {
        Self {
            remote,
            observer,
            cancel,
            chunk_size,
        }
    }

    /// Streams the remote file into the local path, then stamps the local
    /// mtime with `remote_time` so both sides agree on "last changed".
    pub async fn download(&mut self, target: &SyncTarget, remote_time: i64) -> SyncResult<u64> {
        let path = target.remote_path();

        let total = self
            .remote
            .size(path)
            .await
            .map_err(|err| err.in_query(path))?;

        let mut stream = self
            .remote
            .open_download(path)
            .await
            .map_err(|err| err.in_transfer(path))?;

        let mut file = File::create(target.local_path()).await?;
        let mut buf = vec![0u8; self.chunk_size];
        let mut transferred = 0u64;

        loop {
            self.check_cancelled()?;
            let read = stream
                .read_chunk(&mut buf)
                .await
                .map_err(|err| err.in_transfer(path))?;
            if read == 0 {
                break;
            }
            file.write_all(&buf[..read]).await?;
            transferred += read as u64;
            self.observer.transfer_progress(transferred, total);
        }

        file.flush().await?;
        drop(file);

        stream.finish().await.map_err(|err| err.in_transfer(path))?;
        self.remote
            .complete_transfer()
            .await
            .map_err(|err| err.in_transfer(path))?;

        fs::set_file_times(target.local_path(), remote_time)?;
        self.observer.transfer_finished();
        log::debug!("downloaded {} ({transferred} bytes)", target.name());
        Ok(transferred)
    }

    /// Streams the local file to the remote path, then re-queries the
    /// remote's now-current mtime and rewrites the local file's timestamp
    /// to match.
    ///
    /// The device cannot accept an arbitrary mtime on upload; it stamps
    /// the file with its own clock. Without this reconciliation the two
    /// sides would permanently disagree and every later run would
    /// re-upload the same unchanged file.
    pub async fn upload(&mut self, target: &SyncTarget) -> SyncResult<u64> {
        let path = target.remote_path();

        let total = tokio::fs::metadata(target.local_path()).await?.len();
        let mut file = File::open(target.local_path()).await?;

        let mut stream = self
            .remote
            .open_upload(path)
            .await
            .map_err(|err| err.in_transfer(path))?;

        let mut buf = vec![0u8; self.chunk_size];
        let mut transferred = 0u64;

        loop {
            self.check_cancelled()?;
            let read = file.read(&mut buf).await?;
            if read == 0 {
                break;
            }
            stream
                .write_chunk(&buf[..read])
                .await
                .map_err(|err| err.in_transfer(path))?;
            transferred += read as u64;
            self.observer.transfer_progress(transferred, total);
        }

        stream.finish().await.map_err(|err| err.in_transfer(path))?;
        self.remote
            .complete_transfer()
            .await
            .map_err(|err| err.in_transfer(path))?;

        let remote_time = self
            .remote
            .modified_time(path)
            .await
            .map_err(|err| err.in_query(path))?;
        fs::set_file_times(target.local_path(), remote_time)?;

        self.observer.transfer_finished();
        log::debug!("uploaded {} ({transferred} bytes)", target.name());
        Ok(transferred)
    }

    fn check_cancelled(&self) -> SyncResult<()> {
        if self.cancel.load(Ordering::Relaxed) {
            Err(SyncError::Cancelled)
        } else {
            Ok(())
        }
    }
}
