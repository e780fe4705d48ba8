//! Banner grabbing on established TCP connections.
//!
//! Some services greet first (FTP, SSH, SMTP), HTTP needs a request, and
//! everything else gets a bare line terminator as a nudge. Exactly one
//! read is attempted. Any failure yields an empty banner.

use crate::error::BannerFailure;
use std::net::IpAddr;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::trace;

/// Maximum bytes read from the service.
pub const MAX_BANNER_READ: usize = 1024;

/// Maximum characters kept in a banner.
pub const MAX_BANNER_CHARS: usize = 100;

/// Default time allowed for the probe write and for the read.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(2);

/// What to send before reading, chosen by port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerProbe {
    /// Minimal HTTP/1.1 request.
    Http,
    /// Service speaks first; send nothing.
    Passive,
    /// Bare CRLF.
    LineTerminator,
}

impl BannerProbe {
    pub fn for_port(port: u16) -> Self {
        match port {
            80 => Self::Http,
            21 | 22 | 25 => Self::Passive,
            _ => Self::LineTerminator,
        }
    }

    /// Bytes to write before the read, if any.
    pub fn payload(self, ip: IpAddr) -> Option<Vec<u8>> {
        match self {
            Self::Http => {
                let host = match ip {
                    IpAddr::V4(v4) => v4.to_string(),
                    IpAddr::V6(v6) => format!("[{}]", v6),
                };
                Some(format!("GET / HTTP/1.1\r\nHost: {}\r\n\r\n", host).into_bytes())
            }
            Self::Passive => None,
            Self::LineTerminator => Some(b"\r\n".to_vec()),
        }
    }
}

/// Grab a banner from an already-connected stream.
///
/// Never fails: every error along the way is logged and turned into an
/// empty string.
pub async fn grab_banner<S>(
    stream: &mut S,
    ip: IpAddr,
    port: u16,
    read_timeout: Duration,
) -> String
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    match exchange(stream, ip, port, read_timeout).await {
        Ok(banner) => banner,
        Err(e) => {
            trace!(%ip, port, error = %e, "no banner");
            String::new()
        }
    }
}

async fn exchange<S>(
    stream: &mut S,
    ip: IpAddr,
    port: u16,
    read_timeout: Duration,
) -> Result<String, BannerFailure>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    if let Some(payload) = BannerProbe::for_port(port).payload(ip) {
        timeout(read_timeout, stream.write_all(&payload))
            .await
            .map_err(|_| BannerFailure::Timeout)??;
    }

    let mut buffer = [0u8; MAX_BANNER_READ];
    let n = timeout(read_timeout, stream.read(&mut buffer))
        .await
        .map_err(|_| BannerFailure::Timeout)??;

    if n == 0 {
        return Err(BannerFailure::Closed);
    }

    Ok(decode_banner(&buffer[..n]))
}

/// Decode raw banner bytes: lossy UTF-8, trimmed, capped at
/// [`MAX_BANNER_CHARS`] characters.
pub fn decode_banner(data: &[u8]) -> String {
    String::from_utf8_lossy(data)
        .trim()
        .chars()
        .take(MAX_BANNER_CHARS)
        .collect()
}
