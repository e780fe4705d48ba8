//! Error types for portprobe.
//!
//! Uses `thiserror` for ergonomic error definitions. Only [`ScanError`]
//! crosses the engine boundary; per-port failures ([`ConnectFailure`],
//! [`BannerFailure`]) are absorbed into the port result.

use std::path::PathBuf;
use thiserror::Error;

/// Rejected user input. No scan is attempted for any of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("please enter a valid target")]
    EmptyHost,

    #[error("please enter valid port numbers (got '{0}')")]
    NotANumber(String),

    #[error("ports must be between 1-65535 (got {0})")]
    PortOutOfRange(i64),

    #[error("start port ({start}) must not be greater than end port ({end})")]
    StartAfterEnd { start: u16, end: u16 },
}

/// Main error type for scanning operations.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("could not resolve hostname '{host}': {reason}")]
    Resolution { host: String, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Why a TCP connect attempt did not produce a stream.
#[derive(Error, Debug)]
pub enum ConnectFailure {
    #[error("connection refused")]
    Refused,

    #[error("connection timed out")]
    Timeout,

    #[error("unreachable: {0}")]
    Unreachable(String),

    #[error("connect failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Why no banner could be read from an open port.
#[derive(Error, Debug)]
pub enum BannerFailure {
    #[error("banner exchange timed out")]
    Timeout,

    #[error("peer closed the connection without sending data")]
    Closed,

    #[error("banner I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors loading application settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("invalid setting: {0}")]
    InvalidValue(String),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level error for the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scan interrupted by user")]
    Interrupted,

    #[error("{0}")]
    Other(String),
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        Self::Scan(ScanError::Validation(err))
    }
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
