//! Core type definitions using newtype patterns for type safety.
//!
//! These types prevent common logic errors by making invalid states unrepresentable
//! at compile time.

mod port;
mod request;

pub use port::{Port, PortRange};
pub use request::{parse_port_number, ScanInput, ScanRequest};
