// crates/ftp/src/client.rs
//! FTP control-channel client

use crate::error::{FtpError, FtpResult};
use crate::reply::{self, Reply};
use crate::stream::DataStream;
use std::io;
use std::net::IpAddr;
use std::time::Duration;
use tokio::io::{AsyncWriteExt, BufStream};
use tokio::net::TcpStream;

/// Client configuration
#[derive(Debug, Clone)]
pub struct FtpConfig {
    /// Control-connection port used when the host has none
    pub port: u16,
    /// Timeout for establishing connections
    pub connect_timeout: Duration,
}

impl Default for FtpConfig {
    fn default() -> Self {
        Self {
            port: 21,
            connect_timeout: Duration::from_secs(30),
        }
    }
}

/// A logged-in FTP session over one control connection.
///
/// Only the subset the sync engine needs is implemented: `MDTM`, `SIZE`,
/// and passive-mode `RETR`/`STOR` chunk streams. One transfer is in flight
/// at a time, matching how the engine drives it.
#[derive(Debug)]
pub struct FtpClient {
    control: BufStream<TcpStream>,
    peer_ip: IpAddr,
    config: FtpConfig,
}

impl FtpClient {
    /// Connects to the control port and consumes the server greeting.
    pub async fn connect(host: &str) -> FtpResult<Self> {
        Self::connect_with(host, FtpConfig::default()).await
    }

    /// Connects with explicit configuration.
    pub async fn connect_with(host: &str, config: FtpConfig) -> FtpResult<Self> {
        let target = if host.contains(':') {
            host.to_string()
        } else {
            format!("{host}:{}", config.port)
        };

        let connect = TcpStream::connect(&target);
        let stream = tokio::time::timeout(config.connect_timeout, connect)
            .await
            .map_err(|_| FtpError::Connect {
                host: target.clone(),
                source: io::Error::new(io::ErrorKind::TimedOut, "connect timed out"),
            })?
            .map_err(|source| FtpError::Connect {
                host: target.clone(),
                source,
            })?;

        let peer_ip = stream.peer_addr()?.ip();
        let mut client = Self {
            control: BufStream::new(stream),
            peer_ip,
            config,
        };

        let greeting = client.expect("greeting", &[220]).await?;
        log::debug!("connected to {target}: {greeting}");
        Ok(client)
    }

    /// Logs in and switches the connection to binary mode.
    pub async fn login(&mut self, user: &str, password: &str) -> FtpResult<()> {
        let reply = self.command(&format!("USER {user}"), &[230, 331]).await?;
        if reply.code == 331 {
            self.command(&format!("PASS {password}"), &[230])
                .await
                .map_err(|err| match err {
                    FtpError::UnexpectedReply { reply, .. } => FtpError::LoginRejected {
                        user: user.to_string(),
                        reply,
                    },
                    other => other,
                })?;
        }
        self.command("TYPE I", &[200]).await?;
        log::debug!("logged in as {user}");
        Ok(())
    }

    /// Remote modification time (`MDTM`) as whole-second POSIX epoch.
    pub async fn mdtm(&mut self, path: &str) -> FtpResult<i64> {
        let reply = self.command(&format!("MDTM {path}"), &[213]).await?;
        reply::parse_mdtm_timestamp(&reply.text)
    }

    /// Remote file size in bytes (`SIZE`).
    pub async fn size(&mut self, path: &str) -> FtpResult<u64> {
        let reply = self.command(&format!("SIZE {path}"), &[213]).await?;
        reply
            .text
            .trim()
            .parse()
            .map_err(|_| FtpError::MalformedReply { line: reply.text })
    }

    /// Opens a download data stream (`RETR`).
    pub async fn open_download(&mut self, path: &str) -> FtpResult<DataStream> {
        let data = self.open_data_connection().await?;
        self.command(&format!("RETR {path}"), &[125, 150]).await?;
        Ok(DataStream::new(data))
    }

    /// Opens an upload data stream (`STOR`).
    pub async fn open_upload(&mut self, path: &str) -> FtpResult<DataStream> {
        let data = self.open_data_connection().await?;
        self.command(&format!("STOR {path}"), &[125, 150]).await?;
        Ok(DataStream::new(data))
    }

    /// Consumes the end-of-transfer reply that follows a data-connection
    /// close. Must be called exactly once per opened stream.
    pub async fn complete_transfer(&mut self) -> FtpResult<()> {
        self.expect("transfer completion", &[226, 250]).await?;
        Ok(())
    }

    /// Best-effort session teardown.
    pub async fn quit(&mut self) -> FtpResult<()> {
        self.command("QUIT", &[221]).await?;
        Ok(())
    }

    /// Sends one command line and returns the reply if its code is in
    /// `accept`.
    pub async fn command(&mut self, command: &str, accept: &[u16]) -> FtpResult<Reply> {
        let shown = if command.starts_with("PASS ") {
            "PASS ****"
        } else {
            command
        };
        log::trace!("--> {shown}");

        self.control.write_all(command.as_bytes()).await?;
        self.control.write_all(b"\r\n").await?;
        self.control.flush().await?;
        self.expect(shown, accept).await
    }

    async fn expect(&mut self, command: &str, accept: &[u16]) -> FtpResult<Reply> {
        let reply = reply::read_reply(&mut self.control).await?;
        log::trace!("<-- {reply}");
        if accept.contains(&reply.code) {
            Ok(reply)
        } else {
            Err(FtpError::UnexpectedReply {
                command: command.to_string(),
                reply,
            })
        }
    }

    async fn open_data_connection(&mut self) -> FtpResult<TcpStream> {
        let reply = self.command("PASV", &[227]).await?;
        let mut addr = reply::parse_passive_address(&reply.text)?;

        // Devices behind NAT advertise 0.0.0.0 in PASV; fall back to the
        // control connection's peer address.
        if addr.ip().is_unspecified() {
            addr.set_ip(self.peer_ip);
        }

        let connect = TcpStream::connect(addr);
        let stream = tokio::time::timeout(self.config.connect_timeout, connect)
            .await
            .map_err(|_| FtpError::Connect {
                host: addr.to_string(),
                source: io::Error::new(io::ErrorKind::TimedOut, "data connect timed out"),
            })?
            .map_err(|source| FtpError::Connect {
                host: addr.to_string(),
                source,
            })?;
        Ok(stream)
    }
}
