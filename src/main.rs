use anyhow::Context;
use clap::Parser;
use portprobe::cli::{self, Cli};
use portprobe::error::CliError;
use portprobe::output;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let outcome = runtime.block_on(async {
        tokio::select! {
            result = cli::execute(args) => result,
            _ = tokio::signal::ctrl_c() => Err(CliError::Interrupted),
        }
    });

    // Abandoned probes and a pending prompt read are not waited for
    runtime.shutdown_background();

    Ok(match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Interrupted) => {
            eprintln!();
            output::print_warning("Scan interrupted by user");
            ExitCode::SUCCESS
        }
        Err(e) => {
            output::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    })
}
