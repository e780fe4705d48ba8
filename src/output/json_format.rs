//! JSON output format.

use crate::scanner::{PortResult, ScanReport};
use serde::Serialize;
use std::io;

#[derive(Serialize)]
struct JsonReport<'a> {
    target: &'a str,
    ip: String,
    ports: String,
    started_at: String,
    duration_ms: u64,
    ports_scanned: usize,
    open_ports: Vec<&'a PortResult>,
}

/// Render a report as pretty JSON, listing only open ports in port order.
pub fn format_json(report: &ScanReport) -> serde_json::Result<String> {
    let mut open_ports: Vec<&PortResult> = report.results.iter().filter(|r| r.is_open).collect();
    open_ports.sort_by_key(|r| r.port);

    serde_json::to_string_pretty(&JsonReport {
        target: &report.target,
        ip: report.ip.to_string(),
        ports: report.range.to_string(),
        started_at: report.started_at.to_rfc3339(),
        duration_ms: report.duration_ms,
        ports_scanned: report.results.len(),
        open_ports,
    })
}

/// Print results in JSON format.
pub fn print_json(report: &ScanReport) -> io::Result<()> {
    let json = format_json(report).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Port, PortRange};
    use chrono::Utc;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_json_lists_open_ports_sorted() {
        let port = |n| Port::new(n).unwrap();
        let report = ScanReport {
            target: "localhost".to_string(),
            ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            range: PortRange::new(port(20), port(30)).unwrap(),
            started_at: Utc::now(),
            duration_ms: 12,
            results: vec![
                PortResult::open(port(25), "smtp", "220 mail ESMTP"),
                PortResult::closed(port(23)),
                PortResult::open(port(21), "ftp", ""),
            ],
        };

        let json = format_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["ip"], "127.0.0.1");
        assert_eq!(value["ports"], "20-30");
        assert_eq!(value["ports_scanned"], 3);
        let open = value["open_ports"].as_array().unwrap();
        assert_eq!(open.len(), 2);
        assert_eq!(open[0]["port"], 21);
        assert_eq!(open[1]["banner"], "220 mail ESMTP");
    }
}
