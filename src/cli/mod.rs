//! Command-line interface definitions and handlers.
//!
//! Uses `clap` derive macros for declarative argument parsing. Any of the
//! target, start port or end port left off the command line is prompted
//! for on the terminal.

mod prompt;
mod scan;

pub use prompt::{Prompt, TermPrompt};
pub use scan::{execute, prepare, run, InputArgs};

use crate::config::AppSettings;
use crate::error::{CliResult, ConfigError};
use crate::output::{OutputFormat, Palette};
use clap::Parser;
use std::path::PathBuf;

/// A concurrent TCP connect port scanner with banner grabbing.
#[derive(Parser, Debug, Clone)]
#[command(name = "portprobe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scan a host for open TCP ports and grab service banners", long_about = None)]
pub struct Cli {
    /// Target IP address or hostname (prompted for if omitted)
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,

    /// First port of the range, 1-65535 (prompted for if omitted)
    #[arg(short = 's', long, value_name = "PORT", allow_hyphen_values = true)]
    pub start_port: Option<String>,

    /// Last port of the range, 1-65535 (prompted for if omitted)
    #[arg(short = 'e', long, value_name = "PORT", allow_hyphen_values = true)]
    pub end_port: Option<String>,

    /// Maximum number of probes in flight
    #[arg(short = 'c', long, env = "PORTPROBE_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Connect timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub connect_timeout: Option<u64>,

    /// Banner read timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub read_timeout: Option<u64>,

    /// Scan large ranges without asking for confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output format for results
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the header and progress line
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to a settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Settings from the file, overridden by command-line flags.
    pub fn settings(&self) -> CliResult<AppSettings> {
        let mut settings = match &self.config {
            Some(path) => AppSettings::load_from(path)?,
            None => match AppSettings::load() {
                Err(ConfigError::DirectoryNotFound) => AppSettings::default(),
                other => other?,
            },
        };

        if let Some(concurrency) = self.concurrency {
            settings.concurrency = concurrency;
        }
        if let Some(ms) = self.connect_timeout {
            settings.connect_timeout_ms = ms;
        }
        if let Some(ms) = self.read_timeout {
            settings.read_timeout_ms = ms;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Palette for table output.
    pub fn palette(&self) -> Palette {
        if self.no_color {
            Palette::plain()
        } else {
            Palette::colored()
        }
    }

    /// Target and port values given on the command line.
    pub fn input_args(&self) -> InputArgs {
        InputArgs {
            target: self.target.clone(),
            start_port: self.start_port.clone(),
            end_port: self.end_port.clone(),
        }
    }
}
