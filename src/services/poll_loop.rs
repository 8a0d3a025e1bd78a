//! Polling driver for viewerscan.
//!
//! Runs fetch → ingest → render cycles aligned to fixed ticks measured from
//! the loop's start, until the cycle limit is reached or `shutdown` resolves.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::app::App;
use crate::services::page_fetcher::PageFetcher;
use crate::services::renderer::RendererTrait;
use crate::types::errors::ScanError;
use crate::types::settings::{FetchFailurePolicy, PollingSettings};

/// Driver loop parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopOptions {
    pub interval: Duration,
    /// Stop after this many attempted cycles (completed or skipped).
    pub max_cycles: Option<u64>,
    pub fetch_failure: FetchFailurePolicy,
}

impl LoopOptions {
    pub fn from_settings(polling: &PollingSettings, max_cycles: Option<u64>) -> Self {
        Self {
            interval: Duration::from_secs_f64(polling.update_interval_seconds),
            max_cycles,
            fetch_failure: polling.fetch_failure,
        }
    }
}

/// What happened over the loop's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub completed: u64,
    pub skipped: u64,
    /// True when the loop ended because `shutdown` resolved.
    pub interrupted: bool,
}

impl LoopSummary {
    pub fn attempts(&self) -> u64 {
        self.completed + self.skipped
    }
}

/// Time to sleep so the next cycle starts on the next tick of `interval`
/// counted from the loop start: `interval - (elapsed mod interval)`.
pub fn next_sleep(interval: Duration, elapsed: Duration) -> Duration {
    let period = interval.as_secs_f64();
    if period <= 0.0 {
        return Duration::ZERO;
    }
    let remaining = period - elapsed.as_secs_f64() % period;
    Duration::from_secs_f64(remaining.max(0.0))
}

/// Runs the driver loop, writing one rendered summary per completed cycle.
pub async fn run<F, R, W, S>(
    app: &mut App<F>,
    renderer: &R,
    options: &LoopOptions,
    out: &mut W,
    shutdown: S,
) -> Result<LoopSummary, ScanError>
where
    F: PageFetcher,
    R: RendererTrait,
    W: Write,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    let start = Instant::now();
    let mut summary = LoopSummary::default();

    loop {
        let cycle = tokio::select! {
            _ = &mut shutdown => {
                summary.interrupted = true;
                break;
            }
            result = app.run_cycle() => result,
        };

        match cycle {
            Ok(report) => {
                let rendered = renderer.render(report.total_unique, &report.recent);
                writeln!(out, "{}", rendered)
                    .and_then(|_| out.flush())
                    .map_err(|e| ScanError::Output(e.to_string()))?;
                summary.completed += 1;
            }
            Err(ScanError::Fetch(e)) if options.fetch_failure == FetchFailurePolicy::Skip => {
                warn!(error = %e, "fetch failed, skipping cycle");
                summary.skipped += 1;
            }
            Err(e) => {
                error!(error = %e, "scan loop stopped");
                return Err(e);
            }
        }

        if options
            .max_cycles
            .is_some_and(|max| summary.attempts() >= max)
        {
            break;
        }

        let pause = next_sleep(options.interval, start.elapsed());
        tokio::select! {
            _ = &mut shutdown => {
                summary.interrupted = true;
                break;
            }
            _ = tokio::time::sleep(pause) => {}
        }
    }

    info!(
        completed = summary.completed,
        skipped = summary.skipped,
        interrupted = summary.interrupted,
        "scan loop finished"
    );
    Ok(summary)
}
