//! Prober trait abstraction and per-port result type.
//!
//! The engine only depends on [`Prober`], so tests can drive it with
//! synthetic probers instead of real sockets.

use crate::types::Port;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of probing a single port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortResult {
    /// The port number that was probed.
    pub port: Port,
    /// Conventional service name. Empty when closed.
    pub service: String,
    /// Captured banner, at most 100 characters. Empty when closed or silent.
    pub banner: String,
    /// Whether the TCP handshake completed.
    pub is_open: bool,
}

impl PortResult {
    /// A port that did not accept the connection.
    pub fn closed(port: Port) -> Self {
        Self {
            port,
            service: String::new(),
            banner: String::new(),
            is_open: false,
        }
    }

    /// A port that accepted the connection.
    pub fn open(port: Port, service: impl Into<String>, banner: impl Into<String>) -> Self {
        Self {
            port,
            service: service.into(),
            banner: banner.into(),
            is_open: true,
        }
    }
}

/// Trait for single-port probe implementations.
///
/// `probe` must never fail: every I/O problem is folded into the
/// returned [`PortResult`].
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe a single port.
    async fn probe(&self, port: Port) -> PortResult;
}
