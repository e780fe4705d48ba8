//! Scan engine - bounded-concurrency fan-out of port probes.
//!
//! Every port in the requested range is probed exactly once. Probes run as
//! tokio tasks with at most `concurrency` in flight; their results are
//! folded on the calling task, which also owns the progress counters.

pub mod tcp;
pub mod traits;

use crate::banner::DEFAULT_READ_TIMEOUT;
use crate::error::{ScanError, ScanResult};
use crate::resolver;
use crate::types::{PortRange, ScanRequest};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub use tcp::{TcpProber, DEFAULT_CONNECT_TIMEOUT};
pub use traits::{PortResult, Prober};

/// Default maximum number of probes in flight.
pub const DEFAULT_CONCURRENCY: usize = 400;

/// Live counters for a running scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanProgress {
    pub completed: usize,
    pub total: usize,
    pub open_count: usize,
}

impl ScanProgress {
    pub fn new(total: usize) -> Self {
        Self {
            completed: 0,
            total,
            open_count: 0,
        }
    }

    fn record(&mut self, result: &PortResult) {
        self.completed += 1;
        if result.is_open {
            self.open_count += 1;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.completed == self.total
    }
}

/// Receives notifications while a scan runs.
///
/// All calls are made from the task driving the scan, one at a time.
pub trait ScanObserver {
    /// The target has been resolved and probing is about to begin.
    fn scan_started(&mut self, _ip: IpAddr, _range: PortRange) {}

    /// A port has finished probing.
    fn progress(&mut self, progress: ScanProgress);
}

/// Observer that ignores every notification.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {
    fn progress(&mut self, _progress: ScanProgress) {}
}

/// Engine tuning knobs.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Maximum number of probes in flight at once.
    pub concurrency: usize,
    /// Timeout for each TCP connect.
    pub connect_timeout: Duration,
    /// Timeout for the banner write and for the banner read.
    pub read_timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

impl ScanConfig {
    /// Set the concurrency cap.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Set the banner read timeout.
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }
}

/// Everything a finished scan produced.
///
/// `results` holds one entry per port in completion order.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub target: String,
    pub ip: IpAddr,
    pub range: PortRange,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub results: Vec<PortResult>,
}

impl ScanReport {
    /// Number of open ports found.
    pub fn open_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_open).count()
    }
}

/// TCP connect scan engine.
#[derive(Debug, Clone, Default)]
pub struct ScanEngine {
    config: ScanConfig,
}

impl ScanEngine {
    pub fn new(config: ScanConfig) -> ScanResult<Self> {
        if config.concurrency == 0 {
            return Err(ScanError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// Resolve the target and probe every port in the request.
    ///
    /// Fails only when the host cannot be resolved; per-port problems are
    /// reported as closed ports or empty banners.
    pub async fn scan<O: ScanObserver>(
        &self,
        request: &ScanRequest,
        observer: &mut O,
    ) -> ScanResult<ScanReport> {
        let ip = resolver::resolve(request.target_host()).await?;
        let range = request.range();

        info!(
            host = request.target_host(),
            %ip,
            ports = %range,
            concurrency = self.config.concurrency,
            "starting scan"
        );
        observer.scan_started(ip, range);

        let prober = Arc::new(
            TcpProber::new(ip)
                .with_connect_timeout(self.config.connect_timeout)
                .with_read_timeout(self.config.read_timeout),
        );

        let started_at = Utc::now();
        let clock = Instant::now();
        let results = run_probes(prober, range, self.config.concurrency, observer).await;
        let duration = clock.elapsed();

        let report = ScanReport {
            target: request.target_host().to_string(),
            ip,
            range,
            started_at,
            duration_ms: duration.as_millis() as u64,
            results,
        };
        info!(
            open = report.open_count(),
            elapsed_ms = report.duration_ms,
            "scan complete"
        );
        Ok(report)
    }
}

/// Probe every port in `range` with at most `concurrency` probes in flight.
///
/// Returns once every port has a result. Results arrive in completion
/// order, not port order.
pub async fn run_probes<P, O>(
    prober: Arc<P>,
    range: PortRange,
    concurrency: usize,
    observer: &mut O,
) -> Vec<PortResult>
where
    P: Prober + 'static,
    O: ScanObserver + ?Sized,
{
    let mut progress = ScanProgress::new(range.len());
    let mut results = Vec::with_capacity(range.len());

    let mut in_flight = stream::iter(range.iter())
        .map(|port| {
            let prober = Arc::clone(&prober);
            async move {
                match tokio::spawn(async move { prober.probe(port).await }).await {
                    Ok(result) => result,
                    Err(e) => {
                        warn!(%port, error = %e, "probe task failed");
                        PortResult::closed(port)
                    }
                }
            }
        })
        .buffer_unordered(concurrency.max(1));

    while let Some(result) = in_flight.next().await {
        progress.record(&result);
        observer.progress(progress);
        results.push(result);
    }

    results
}
