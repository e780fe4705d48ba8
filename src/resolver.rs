//! Target host resolution.
//!
//! Turns the user-supplied host into the single IP address the scan runs
//! against. IP literals bypass DNS entirely.

use crate::error::{ScanError, ScanResult};
use std::net::IpAddr;
use tracing::{debug, warn};
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Resolve a hostname or IP address string to one `IpAddr`.
///
/// Performs a single lookup with no retries. When a name maps to several
/// addresses the first one returned is used.
pub async fn resolve(host: &str) -> ScanResult<IpAddr> {
    let host = host.trim();

    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    if !is_valid_hostname(host) {
        return Err(ScanError::Resolution {
            host: host.to_string(),
            reason: "not a valid hostname".to_string(),
        });
    }

    let resolver = system_resolver();

    let response = resolver
        .lookup_ip(host)
        .await
        .map_err(|e| ScanError::Resolution {
            host: host.to_string(),
            reason: e.to_string(),
        })?;

    let ip = response.iter().next().ok_or_else(|| ScanError::Resolution {
        host: host.to_string(),
        reason: "no addresses found".to_string(),
    })?;

    debug!(%host, %ip, "resolved target");
    Ok(ip)
}

/// Resolver built from the host's resolv.conf and hosts file.
///
/// Falls back to the public default servers only when the system
/// configuration cannot be read.
fn system_resolver() -> TokioAsyncResolver {
    TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
        warn!(error = %e, "system resolver config unavailable, using defaults");
        TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
    })
}

/// Check if a string is a syntactically valid hostname.
fn is_valid_hostname(s: &str) -> bool {
    if s.is_empty() || s.len() > 253 {
        return false;
    }

    // A single trailing dot (fully-qualified form) is allowed
    let s = s.strip_suffix('.').unwrap_or(s);

    s.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}
