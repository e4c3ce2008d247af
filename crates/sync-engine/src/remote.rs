// crates/sync-engine/src/remote.rs
//! Transport seam between the engine and the device
//!
//! The engine only ever speaks to a [`RemoteStore`]: modified-time and
//! size queries plus chunk streams in both directions. [`FtpRemote`] is
//! the production implementation; tests drive the engine through an
//! in-memory store instead.

use crate::error::SyncResult;
use async_trait::async_trait;
use mcsync_ftp::{DataStream, FtpClient};

/// One open chunk stream, download or upload
#[async_trait]
pub trait RemoteStream: Send {
    /// Next chunk into `buf`; `Ok(0)` is end of stream (download side)
    async fn read_chunk(&mut self, buf: &mut [u8]) -> SyncResult<usize>;

    /// One chunk, written fully (upload side)
    async fn write_chunk(&mut self, buf: &[u8]) -> SyncResult<()>;

    /// Ends the stream; uploaded data becomes visible remotely after this
    async fn finish(self: Box<Self>) -> SyncResult<()>;
}

/// Remote side of the sync
#[async_trait]
pub trait RemoteStore: Send {
    /// Last-modified time of `path`, whole-second POSIX epoch (UTC)
    async fn modified_time(&mut self, path: &str) -> SyncResult<i64>;

    /// Size of `path` in bytes
    async fn size(&mut self, path: &str) -> SyncResult<u64>;

    /// Opens a download stream for `path`
    async fn open_download(&mut self, path: &str) -> SyncResult<Box<dyn RemoteStream>>;

    /// Opens an upload stream for `path`
    async fn open_upload(&mut self, path: &str) -> SyncResult<Box<dyn RemoteStream>>;

    /// Acknowledges the end of the most recently opened stream
    async fn complete_transfer(&mut self) -> SyncResult<()>;
}

/// FTP-backed remote store: the MemCard PRO 2 itself
pub struct FtpRemote {
    client: FtpClient,
}

impl FtpRemote {
    /// Connects and logs in; returns the live session.
    pub async fn connect(host: &str, user: &str, password: &str) -> SyncResult<Self> {
        let mut client = FtpClient::connect(host).await?;
        client.login(user, password).await?;
        Ok(Self { client })
    }

    /// Best-effort session teardown.
    pub async fn close(&mut self) {
        if let Err(err) = self.client.quit().await {
            log::debug!("QUIT failed: {err}");
        }
    }
}

struct FtpRemoteStream {
    inner: DataStream,
}

#[async_trait]
impl RemoteStream for FtpRemoteStream {
    async fn read_chunk(&mut self, buf: &mut [u8]) -> SyncResult<usize> {
        Ok(self.inner.read_chunk(buf).await?)
    }

    async fn write_chunk(&mut self, buf: &[u8]) -> SyncResult<()> {
        Ok(self.inner.write_chunk(buf).await?)
    }

    async fn finish(self: Box<Self>) -> SyncResult<()> {
        Ok(self.inner.finish().await?)
    }
}

#[async_trait]
impl RemoteStore for FtpRemote {
    async fn modified_time(&mut self, path: &str) -> SyncResult<i64> {
        Ok(self.client.mdtm(path).await?)
    }

    async fn size(&mut self, path: &str) -> SyncResult<u64> {
        Ok(self.client.size(path).await?)
    }

    async fn open_download(&mut self, path: &str) -> SyncResult<Box<dyn RemoteStream>> {
        let inner = self.client.open_download(path).await?;
        Ok(Box::new(FtpRemoteStream { inner }))
    }

    async fn open_upload(&mut self, path: &str) -> SyncResult<Box<dyn RemoteStream>> {
        let inner = self.client.open_upload(path).await?;
        Ok(Box::new(FtpRemoteStream { inner }))
    }

    async fn complete_transfer(&mut self) -> SyncResult<()> {
        Ok(self.client.complete_transfer().await?)
    }
}
