// crates/ftp/src/stream.rs
//! Passive-mode data connection streams

use crate::error::FtpResult;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// One open data connection, readable or writable in caller-sized chunks.
///
/// The control connection stays with [`crate::FtpClient`]; after the last
/// chunk, call [`DataStream::finish`] and then
/// [`crate::FtpClient::complete_transfer`] to consume the server's
/// end-of-transfer reply.
#[derive(Debug)]
pub struct DataStream {
    inner: TcpStream,
}

impl DataStream {
    pub(crate) fn new(inner: TcpStream) -> Self {
        Self { inner }
    }

    /// Reads the next chunk into `buf`; `Ok(0)` signals end of stream.
    pub async fn read_chunk(&mut self, buf: &mut [u8]) -> FtpResult<usize> {
        Ok(self.inner.read(buf).await?)
    }

    /// Writes one chunk fully.
    pub async fn write_chunk(&mut self, buf: &[u8]) -> FtpResult<()> {
        Ok(self.inner.write_all(buf).await?)
    }

    /// Flushes and closes the connection, which is how FTP signals
    /// end-of-data to the server.
    pub async fn finish(mut self) -> FtpResult<()> {
        self.inner.flush().await?;
        self.inner.shutdown().await?;
        Ok(())
    }
}
