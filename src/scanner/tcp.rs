//! TCP connect prober.
//!
//! Performs a full TCP handshake against each port using the operating
//! system's socket API, then reuses the live connection to grab a banner.
//! No elevated privileges are required.

use crate::banner::{grab_banner, DEFAULT_READ_TIMEOUT};
use crate::error::ConnectFailure;
use crate::scanner::traits::{PortResult, Prober};
use crate::services::service_name;
use crate::types::Port;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// Default connect timeout per port.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// TCP connect prober bound to a single target address.
#[derive(Debug, Clone)]
pub struct TcpProber {
    target: IpAddr,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl TcpProber {
    /// Create a prober with the default connect and read timeouts.
    pub fn new(target: IpAddr) -> Self {
        Self {
            target,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Set the banner read timeout.
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Attempt to connect to the target address.
    async fn connect(&self, addr: SocketAddr) -> Result<TcpStream, ConnectFailure> {
        match timeout(self.connect_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) if e.kind() == ErrorKind::ConnectionRefused => Err(ConnectFailure::Refused),
            Ok(Err(e)) if e.to_string().to_lowercase().contains("unreachable") => {
                Err(ConnectFailure::Unreachable(e.to_string()))
            }
            Ok(Err(e)) => Err(ConnectFailure::Io(e)),
            Err(_) => Err(ConnectFailure::Timeout),
        }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, port: Port) -> PortResult {
        let addr = SocketAddr::new(self.target, port.as_u16());

        match self.connect(addr).await {
            Ok(mut stream) => {
                let service = service_name(port.as_u16());
                let banner =
                    grab_banner(&mut stream, self.target, port.as_u16(), self.read_timeout).await;
                drop(stream);
                PortResult::open(port, service, banner)
            }
            Err(failure) => {
                trace!(%addr, error = %failure, "port closed");
                PortResult::closed(port)
            }
        }
    }
}
