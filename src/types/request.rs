//! Scan request construction and input validation.
//!
//! A [`ScanRequest`] can only be built through [`ScanRequest::from_input`]
//! or [`ScanRequest::new`], so a request in hand always satisfies
//! `1 <= start <= end <= 65535` with a non-empty host.

use super::port::{Port, PortRange};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Unvalidated values as typed by the user or passed on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanInput {
    pub host: String,
    pub start_port: String,
    pub end_port: String,
}

impl ScanInput {
    pub fn new(
        host: impl Into<String>,
        start_port: impl Into<String>,
        end_port: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            start_port: start_port.into(),
            end_port: end_port.into(),
        }
    }
}

/// A validated request to scan one host over an inclusive port range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    target_host: String,
    range: PortRange,
}

impl ScanRequest {
    /// Build a request from an already-valid range.
    pub fn new(host: impl Into<String>, range: PortRange) -> Result<Self, ValidationError> {
        let target_host = host.into().trim().to_string();
        if target_host.is_empty() {
            return Err(ValidationError::EmptyHost);
        }
        Ok(Self { target_host, range })
    }

    /// Validate raw input.
    ///
    /// Checks run in order: empty host, non-integer ports, ports out of
    /// bounds, inverted range. The first failing check is reported.
    pub fn from_input(input: &ScanInput) -> Result<Self, ValidationError> {
        let host = input.host.trim();
        if host.is_empty() {
            return Err(ValidationError::EmptyHost);
        }

        let start = parse_port_number(&input.start_port)?;
        let end = parse_port_number(&input.end_port)?;
        let start = to_port(start)?;
        let end = to_port(end)?;

        let range = PortRange::new(start, end).ok_or(ValidationError::StartAfterEnd {
            start: start.as_u16(),
            end: end.as_u16(),
        })?;

        Self::new(host, range)
    }

    pub fn target_host(&self) -> &str {
        &self.target_host
    }

    pub fn range(&self) -> PortRange {
        self.range
    }

    /// Whether this request is large enough to need explicit confirmation.
    ///
    /// The comparison is on `end - start`, so a threshold of 1000 lets
    /// 1001 ports through unconfirmed.
    pub fn needs_confirmation(&self, threshold: u16) -> bool {
        self.range.span() > threshold
    }
}

/// Parse a port as a plain integer, without checking its bounds.
pub fn parse_port_number(raw: &str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .map_err(|_| ValidationError::NotANumber(raw.to_string()))
}

fn to_port(value: i64) -> Result<Port, ValidationError> {
    u16::try_from(value)
        .ok()
        .and_then(Port::new)
        .ok_or(ValidationError::PortOutOfRange(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        let request = ScanRequest::from_input(&ScanInput::new(" localhost ", "20", "25")).unwrap();
        assert_eq!(request.target_host(), "localhost");
        assert_eq!(request.range().len(), 6);
    }

    #[test]
    fn test_empty_host_rejected() {
        let err = ScanRequest::from_input(&ScanInput::new("   ", "1", "2")).unwrap_err();
        assert_eq!(err, ValidationError::EmptyHost);
    }

    #[test]
    fn test_non_integer_rejected() {
        let err = ScanRequest::from_input(&ScanInput::new("h", "eighty", "90")).unwrap_err();
        assert!(matches!(err, ValidationError::NotANumber(s) if s == "eighty"));

        let err = ScanRequest::from_input(&ScanInput::new("h", "80", "9.5")).unwrap_err();
        assert!(matches!(err, ValidationError::NotANumber(_)));
    }

    #[test]
    fn test_parse_port_number_accepts_any_integer() {
        assert_eq!(parse_port_number(" 70000 "), Ok(70000));
        assert_eq!(parse_port_number("-1"), Ok(-1));
        let err = parse_port_number("ssh").unwrap_err();
        assert!(matches!(err, ValidationError::NotANumber(s) if s == "ssh"));
    }

    #[test]
    fn test_out_of_range_rejected() {
        for (start, end, bad) in [("0", "10", 0), ("1", "65536", 65536), ("-5", "10", -5)] {
            let err = ScanRequest::from_input(&ScanInput::new("h", start, end)).unwrap_err();
            assert_eq!(err, ValidationError::PortOutOfRange(bad));
        }
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = ScanRequest::from_input(&ScanInput::new("h", "5000", "100")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::StartAfterEnd {
                start: 5000,
                end: 100
            }
        );
    }

    #[test]
    fn test_needs_confirmation_threshold() {
        let small = ScanRequest::from_input(&ScanInput::new("h", "1", "1001")).unwrap();
        assert!(!small.needs_confirmation(1000));

        let large = ScanRequest::from_input(&ScanInput::new("h", "1", "2000")).unwrap();
        assert!(large.needs_confirmation(1000));
    }
}
