//! Output formatting module.
//!
//! Provides the plain text table and JSON renderings of scan results.

mod json_format;
mod plain;

pub use json_format::{format_json, print_json};
pub use plain::{
    banner_snippet, format_results, print_error, print_scan_header, print_title, print_warning,
    Palette, BANNER_SNIPPET_CHARS,
};

use crate::scanner::ScanReport;
use std::io;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Plain,
    /// JSON structured output
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Format and print scan results according to the specified format.
pub fn print_results(
    report: &ScanReport,
    format: OutputFormat,
    palette: &Palette,
) -> io::Result<()> {
    match format {
        OutputFormat::Plain => {
            print!("{}", format_results(&report.results, palette));
            Ok(())
        }
        OutputFormat::Json => print_json(report),
    }
}
