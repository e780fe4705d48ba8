//! # portprobe - A Concurrent TCP Port Scanner
//!
//! portprobe determines which TCP ports on a host accept connections,
//! names the likely service, and captures a short banner from each open
//! port.
//!
//! ## Features
//!
//! - **Bounded concurrency**: a fixed cap on probes in flight, 400 by default
//! - **Banner grabbing**: protocol-aware nudges for HTTP and line-based services
//! - **Live progress**: completed and open counts while the scan runs
//! - **Plain and JSON output**: a fixed-width table or structured report
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portprobe::scanner::{NoopObserver, ScanConfig, ScanEngine};
//! use portprobe::types::{ScanInput, ScanRequest};
//!
//! #[tokio::main]
//! async fn main() {
//!     let request = ScanRequest::from_input(&ScanInput::new("127.0.0.1", "1", "1024")).unwrap();
//!     let engine = ScanEngine::new(ScanConfig::default()).unwrap();
//!     let report = engine.scan(&request, &mut NoopObserver).await.unwrap();
//!
//!     print!("{}", portprobe::output::format_results(&report.results, &Default::default()));
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated ports, ranges and scan requests
//! - [`resolver`] - Hostname to IP resolution
//! - [`scanner`] - The scan engine, the `Prober` trait and the TCP prober
//! - [`banner`] - Banner grabbing on established connections
//! - [`services`] - Well-known port to service name table
//! - [`output`] - Table and JSON rendering
//! - [`config`] - Optional settings file
//! - [`cli`] - Command-line front end
//! - [`error`] - Error types

pub mod banner;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod resolver;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ScanError, ValidationError};
pub use scanner::{PortResult, Prober, ScanEngine, ScanProgress, ScanReport};
pub use types::{Port, PortRange, ScanInput, ScanRequest};
