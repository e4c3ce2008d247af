// crates/ftp/src/reply.rs
//! Control-channel reply parsing
//!
//! RFC 959 replies are one or more lines; a multi-line reply opens with
//! `ddd-` and closes with a `ddd ` completion line carrying the same code.
//! Only the completion line's text matters to the commands this client
//! issues (MDTM, SIZE, PASV all answer in a single line).

use crate::error::{FtpError, FtpResult};
use chrono::NaiveDateTime;
use std::fmt;
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// A parsed control-channel reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// 3-digit reply code of the completion line
    pub code: u16,
    /// Text of the completion line, code stripped
    pub text: String,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.text)
    }
}

fn reply_code(line: &str) -> Option<u16> {
    let digits = line.get(..3)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

async fn read_line<R>(reader: &mut R) -> FtpResult<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    let read = reader.read_line(&mut line).await?;
    if read == 0 {
        return Err(FtpError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "control connection closed",
        )));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Reads one complete reply, consuming intermediate lines of a multi-line
/// block until the completion line arrives.
pub(crate) async fn read_reply<R>(reader: &mut R) -> FtpResult<Reply>
where
    R: AsyncBufRead + Unpin,
{
    let first = read_line(reader).await?;
    let code = reply_code(&first).ok_or_else(|| FtpError::MalformedReply {
        line: first.clone(),
    })?;

    let mut last = first;
    if last.as_bytes().get(3) == Some(&b'-') {
        loop {
            let line = read_line(reader).await?;
            let completes =
                reply_code(&line) == Some(code) && line.as_bytes().get(3) == Some(&b' ');
            if completes {
                last = line;
                break;
            }
        }
    }

    let text = last.get(4..).unwrap_or("").trim().to_string();
    Ok(Reply { code, text })
}

/// Parses the `(h1,h2,h3,h4,p1,p2)` tuple out of a PASV reply text.
pub(crate) fn parse_passive_address(text: &str) -> FtpResult<SocketAddr> {
    let malformed = || FtpError::MalformedPassiveAddress {
        text: text.to_string(),
    };

    let open = text.find('(').ok_or_else(malformed)?;
    let close = text[open..].find(')').ok_or_else(malformed)? + open;
    let fields: Vec<u16> = text[open + 1..close]
        .split(',')
        .map(|field| field.trim().parse::<u16>())
        .collect::<Result<_, _>>()
        .map_err(|_| malformed())?;

    let [h1, h2, h3, h4, p1, p2] = fields[..] else {
        return Err(malformed());
    };
    if [h1, h2, h3, h4].iter().any(|octet| *octet > 255) || p1 > 255 || p2 > 255 {
        return Err(malformed());
    }

    let ip = Ipv4Addr::new(h1 as u8, h2 as u8, h3 as u8, h4 as u8);
    Ok(SocketAddr::V4(SocketAddrV4::new(ip, p1 * 256 + p2)))
}

/// Parses a fixed 14-digit `YYYYMMDDHHMMSS` MDTM timestamp (always UTC)
/// into whole seconds since the POSIX epoch.
pub(crate) fn parse_mdtm_timestamp(text: &str) -> FtpResult<i64> {
    let malformed = || FtpError::MalformedTimestamp {
        text: text.to_string(),
    };

    let digits = text.trim();
    if digits.len() != 14 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    let naive = NaiveDateTime::parse_from_str(digits, "%Y%m%d%H%M%S").map_err(|_| malformed())?;
    Ok(naive.and_utc().timestamp())
}
