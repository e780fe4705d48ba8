//! Plain text output formatting.
//!
//! Produces the fixed-width results table and the status lines printed
//! around a scan. Colors come from a [`Palette`] value.

use crate::scanner::PortResult;
use console::{style, Style};
use std::fmt::Write;
use std::net::IpAddr;

/// Characters of banner shown in the results table.
pub const BANNER_SNIPPET_CHARS: usize = 30;

const RULE_WIDTH: usize = 60;

/// Styles applied to the parts of the results table.
#[derive(Debug, Clone)]
pub struct Palette {
    pub heading: Style,
    pub port: Style,
    pub banner: Style,
    pub warning: Style,
}

impl Palette {
    /// Green headings and banners, red port numbers and warnings.
    pub fn colored() -> Self {
        Self {
            heading: Style::new().green(),
            port: Style::new().red(),
            banner: Style::new().green(),
            warning: Style::new().red(),
        }
    }

    /// No escape codes at all.
    pub fn plain() -> Self {
        Self {
            heading: Style::new(),
            port: Style::new(),
            banner: Style::new(),
            warning: Style::new(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::colored()
    }
}

/// Render open ports as a table sorted by port number.
///
/// Closed ports are skipped. When nothing is open a single
/// "No open ports found" line is returned instead.
pub fn format_results(results: &[PortResult], palette: &Palette) -> String {
    let mut open: Vec<&PortResult> = results.iter().filter(|r| r.is_open).collect();

    if open.is_empty() {
        return format!("{}\n", palette.warning.apply_to("[-] No open ports found"));
    }

    open.sort_by_key(|r| r.port);

    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", palette.heading.apply_to("[+] Port Scan Results:"));
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "{:<8} {:<15} {:<10} {:<20}", "Port", "Service", "Status", "Banner");
    let _ = writeln!(out, "{}", rule);

    for result in &open {
        let _ = write!(
            out,
            "{} {:<15} {:<10} ",
            palette.port.apply_to(format!("{:<8}", result.port.as_u16())),
            result.service,
            "Open"
        );
        let snippet = banner_snippet(&result.banner);
        if snippet.is_empty() {
            let _ = writeln!(out);
        } else {
            let _ = writeln!(out, "{}", palette.banner.apply_to(snippet));
        }
    }

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "{}",
        palette
            .heading
            .apply_to(format!("[+] Found {} open ports", open.len()))
    );

    out
}

/// First line of a banner, cut to [`BANNER_SNIPPET_CHARS`] characters.
pub fn banner_snippet(banner: &str) -> String {
    banner
        .lines()
        .next()
        .unwrap_or_default()
        .trim_end()
        .chars()
        .take(BANNER_SNIPPET_CHARS)
        .collect()
}

/// Print the title shown before prompting.
pub fn print_title(palette: &Palette) {
    let rule = "=".repeat(50);
    println!("{}", palette.heading.apply_to(&rule));
    println!("{}", palette.heading.apply_to("         PORT SCANNER"));
    println!("{}", palette.heading.apply_to(&rule));
}

/// Print a scan header once the target is resolved.
pub fn print_scan_header(ip: IpAddr, ports: &str, palette: &Palette) {
    println!(
        "{}",
        palette
            .heading
            .apply_to(format!("[+] Starting scan on host: {}", ip))
    );
    println!(
        "{}",
        palette.heading.apply_to(format!("[+] Scanning ports {}", ports))
    );
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}
