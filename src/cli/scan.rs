//! Scan command implementation.
//!
//! Gathers and validates input, asks for confirmation on large ranges,
//! then drives the engine with a live progress line.

use crate::cli::prompt::{Prompt, TermPrompt};
use crate::cli::Cli;
use crate::error::{CliError, CliResult, ValidationError};
use crate::output::{self, OutputFormat, Palette};
use crate::scanner::{ScanEngine, ScanObserver, ScanProgress, ScanReport};
use crate::types::{parse_port_number, PortRange, ScanInput, ScanRequest};
use indicatif::{ProgressBar, ProgressStyle};
use std::net::IpAddr;
use tracing::debug;

/// Values supplied on the command line; `None` means ask interactively.
#[derive(Debug, Clone, Default)]
pub struct InputArgs {
    pub target: Option<String>,
    pub start_port: Option<String>,
    pub end_port: Option<String>,
}

impl InputArgs {
    /// Whether any value still has to be prompted for.
    pub fn is_incomplete(&self) -> bool {
        self.target.is_none() || self.start_port.is_none() || self.end_port.is_none()
    }
}

fn value_or_ask<P: Prompt>(
    value: &Option<String>,
    question: &str,
    prompt: &mut P,
) -> CliResult<String> {
    match value {
        Some(v) => Ok(v.clone()),
        None => Ok(prompt.ask(question)?),
    }
}

/// Turn command-line values and prompt answers into a request.
///
/// Returns `Ok(None)` when the user declines a large-range confirmation.
/// No network activity happens here.
pub fn prepare<P: Prompt>(
    args: &InputArgs,
    confirm_threshold: u16,
    assume_yes: bool,
    prompt: &mut P,
) -> CliResult<Option<ScanRequest>> {
    let host = value_or_ask(&args.target, "Enter target IP/hostname: ", prompt)?;
    if host.trim().is_empty() {
        return Err(ValidationError::EmptyHost.into());
    }

    let start_port = value_or_ask(&args.start_port, "Enter start port (1-65535): ", prompt)?;
    parse_port_number(&start_port)?;
    let end_port = value_or_ask(&args.end_port, "Enter end port (1-65535): ", prompt)?;

    let request = ScanRequest::from_input(&ScanInput::new(host, start_port, end_port))?;

    if assume_yes || !request.needs_confirmation(confirm_threshold) {
        return Ok(Some(request));
    }

    let answer = prompt.ask(&format!(
        "Warning: Scanning {} ports. Continue? (y/N): ",
        request.range().len()
    ))?;

    if answer.trim().eq_ignore_ascii_case("y") {
        Ok(Some(request))
    } else {
        debug!(answer = answer.trim(), "large scan declined");
        Ok(None)
    }
}

/// Progress line and scan header shown while the engine runs.
struct ProgressReporter {
    palette: Palette,
    show_header: bool,
    show_progress: bool,
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    fn new(palette: Palette, show_header: bool, show_progress: bool) -> Self {
        Self {
            palette,
            show_header,
            show_progress,
            bar: None,
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }
}

impl ScanObserver for ProgressReporter {
    fn scan_started(&mut self, ip: IpAddr, range: PortRange) {
        if self.show_header {
            output::print_scan_header(ip, &range.to_string(), &self.palette);
        }

        let bar = if self.show_progress {
            let style = ProgressStyle::with_template(
                "{spinner:.green} [+] Progress: {pos}/{len} ports scanned, {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar());
            let bar = ProgressBar::new(range.len() as u64);
            bar.set_style(style);
            bar.set_message("0 open");
            bar
        } else {
            ProgressBar::hidden()
        };
        self.bar = Some(bar);
    }

    fn progress(&mut self, progress: ScanProgress) {
        if let Some(bar) = &self.bar {
            bar.set_position(progress.completed as u64);
            bar.set_message(format!("{} open", progress.open_count));
        }
    }
}

/// Gather input with `prompt`, then scan through `engine`.
///
/// Prompting runs on a blocking thread. Returns `Ok(None)` when the user
/// declines a large-range confirmation, in which case nothing is resolved
/// or probed and `observer` is never called.
pub async fn run<P, O>(
    input: InputArgs,
    confirm_threshold: u16,
    assume_yes: bool,
    mut prompt: P,
    engine: &ScanEngine,
    observer: &mut O,
) -> CliResult<Option<ScanReport>>
where
    P: Prompt + Send + 'static,
    O: ScanObserver,
{
    let prepared = tokio::task::spawn_blocking(move || {
        prepare(&input, confirm_threshold, assume_yes, &mut prompt)
    })
    .await
    .map_err(|e| CliError::Other(format!("input task failed: {}", e)))??;

    let Some(request) = prepared else {
        return Ok(None);
    };

    Ok(Some(engine.scan(&request, observer).await?))
}

/// Execute a scan from parsed command-line arguments.
pub async fn execute(cli: Cli) -> CliResult<()> {
    let settings = cli.settings()?;
    let engine = ScanEngine::new(settings.scan_config())?;
    let palette = cli.palette();
    let plain = cli.output == OutputFormat::Plain;
    let input = cli.input_args();

    if input.is_incomplete() && plain && !cli.quiet {
        output::print_title(&palette);
    }

    let prompt = TermPrompt::new(palette.clone(), cli.output);
    let mut reporter = ProgressReporter::new(palette.clone(), plain && !cli.quiet, !cli.quiet);
    let scanned = run(
        input,
        settings.confirm_threshold,
        cli.yes,
        prompt,
        &engine,
        &mut reporter,
    )
    .await;
    reporter.finish();

    let Some(report) = scanned? else {
        output::print_warning("Scan cancelled");
        return Ok(());
    };

    if plain {
        println!();
    }
    output::print_results(&report, cli.output, &palette)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::prompt::testing::ScriptedPrompt;
    use crate::error::ScanError;
    use crate::scanner::ScanConfig;
    use std::net::Ipv4Addr;
    use std::time::Duration;
    use tokio::net::TcpListener;

    fn args(target: &str, start: &str, end: &str) -> InputArgs {
        InputArgs {
            target: Some(target.to_string()),
            start_port: Some(start.to_string()),
            end_port: Some(end.to_string()),
        }
    }

    fn validation_error(result: CliResult<Option<ScanRequest>>) -> ValidationError {
        match result {
            Err(CliError::Scan(ScanError::Validation(e))) => e,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    /// Counts every observer callback.
    #[derive(Default)]
    struct Recorder {
        started: usize,
        updates: usize,
    }

    impl ScanObserver for Recorder {
        fn scan_started(&mut self, _ip: IpAddr, _range: PortRange) {
            self.started += 1;
        }

        fn progress(&mut self, _progress: ScanProgress) {
            self.updates += 1;
        }
    }

    fn loopback_engine() -> ScanEngine {
        ScanEngine::new(
            ScanConfig::default()
                .with_connect_timeout(Duration::from_millis(200))
                .with_read_timeout(Duration::from_millis(100)),
        )
        .unwrap()
    }

    /// Two adjacent loopback ports below 65535.
    async fn loopback_pair() -> (u16, u16) {
        loop {
            let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
            let port = listener.local_addr().unwrap().port();
            if port < 65535 {
                return (port, port + 1);
            }
        }
    }

    #[test]
    fn test_flags_need_no_prompts() {
        let mut prompt = ScriptedPrompt::default();
        let request = prepare(&args("localhost", "20", "25"), 1000, false, &mut prompt)
            .unwrap()
            .unwrap();
        assert_eq!(request.target_host(), "localhost");
        assert_eq!(request.range().len(), 6);
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn test_missing_values_are_prompted_in_order() {
        let mut prompt = ScriptedPrompt::new(["scanme.example", "1", "80"]);
        let request = prepare(&InputArgs::default(), 1000, false, &mut prompt)
            .unwrap()
            .unwrap();
        assert_eq!(request.target_host(), "scanme.example");
        assert_eq!(prompt.asked.len(), 3);
        assert!(prompt.asked[0].contains("target"));
        assert!(prompt.asked[1].contains("start port"));
        assert!(prompt.asked[2].contains("end port"));
    }

    #[test]
    fn test_empty_host_stops_before_port_prompts() {
        let mut prompt = ScriptedPrompt::new(["   "]);
        let err = validation_error(prepare(&InputArgs::default(), 1000, false, &mut prompt));
        assert_eq!(err, ValidationError::EmptyHost);
        assert_eq!(prompt.asked.len(), 1);
    }

    #[test]
    fn test_non_numeric_start_stops_before_end_prompt() {
        let mut prompt = ScriptedPrompt::new(["localhost", "eighty", "90"]);
        let err = validation_error(prepare(&InputArgs::default(), 1000, false, &mut prompt));
        assert_eq!(err, ValidationError::NotANumber("eighty".to_string()));
        assert_eq!(prompt.asked.len(), 2);
    }

    #[test]
    fn test_out_of_range_start_still_asks_for_end() {
        let mut prompt = ScriptedPrompt::new(["localhost", "0", "abc"]);
        let err = validation_error(prepare(&InputArgs::default(), 1000, false, &mut prompt));
        assert_eq!(err, ValidationError::NotANumber("abc".to_string()));
        assert_eq!(prompt.asked.len(), 3);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut prompt = ScriptedPrompt::default();
        let input = args("localhost", "5000", "100");
        let err = validation_error(prepare(&input, 1000, false, &mut prompt));
        assert_eq!(
            err,
            ValidationError::StartAfterEnd {
                start: 5000,
                end: 100
            }
        );
    }

    #[test]
    fn test_non_numeric_port_rejected() {
        let mut prompt = ScriptedPrompt::default();
        let input = args("localhost", "1", "abc");
        let err = validation_error(prepare(&input, 1000, false, &mut prompt));
        assert!(matches!(err, ValidationError::NotANumber(_)));
    }

    #[test]
    fn test_large_range_asks_for_confirmation() {
        let mut prompt = ScriptedPrompt::new(["y"]);
        let request = prepare(&args("localhost", "1", "2000"), 1000, false, &mut prompt).unwrap();
        assert!(request.is_some());
        assert_eq!(prompt.asked.len(), 1);
        assert!(prompt.asked[0].contains("Scanning 2000 ports"));
    }

    #[test]
    fn test_declining_or_blank_answer_aborts() {
        for answer in ["n", "", "yes", "N"] {
            let mut prompt = ScriptedPrompt::new([answer]);
            let prepared =
                prepare(&args("localhost", "1", "2000"), 1000, false, &mut prompt).unwrap();
            assert!(prepared.is_none(), "answer {:?} should abort", answer);
        }
    }

    #[test]
    fn test_assume_yes_skips_confirmation() {
        let mut prompt = ScriptedPrompt::default();
        let request = prepare(&args("localhost", "1", "65535"), 1000, true, &mut prompt).unwrap();
        assert!(request.is_some());
        assert!(prompt.asked.is_empty());
    }

    #[tokio::test]
    async fn test_declined_scan_never_reaches_engine() {
        let (start, end) = loopback_pair().await;
        let input = args("127.0.0.1", &start.to_string(), &end.to_string());
        let prompt = ScriptedPrompt::new(["n"]);
        let mut recorder = Recorder::default();

        let report = run(input, 0, false, prompt, &loopback_engine(), &mut recorder)
            .await
            .unwrap();

        assert!(report.is_none());
        assert_eq!(recorder.started, 0);
        assert_eq!(recorder.updates, 0);
    }

    #[tokio::test]
    async fn test_confirmed_scan_reaches_engine() {
        let (start, end) = loopback_pair().await;
        let input = args("127.0.0.1", &start.to_string(), &end.to_string());
        let prompt = ScriptedPrompt::new(["y"]);
        let mut recorder = Recorder::default();

        let report = run(input, 0, false, prompt, &loopback_engine(), &mut recorder)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(report.results.len(), 2);
        assert_eq!(recorder.started, 1);
        assert_eq!(recorder.updates, 2);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_engine() {
        let prompt = ScriptedPrompt::default();
        let mut recorder = Recorder::default();

        let result = run(
            args("127.0.0.1", "0", "10"),
            1000,
            false,
            prompt,
            &loopback_engine(),
            &mut recorder,
        )
        .await;

        assert!(matches!(
            result,
            Err(CliError::Scan(ScanError::Validation(ValidationError::PortOutOfRange(0))))
        ));
        assert_eq!(recorder.started, 0);
    }
}
