//! Periodic statistics reporting.

use crate::stats::Stats;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Logs a snapshot of the counters on a fixed cadence.
///
/// The reporter only reads snapshots published by the aggregator, so a slow
/// log sink never holds up outcome processing.
pub struct PeriodicReporter {
    snapshots: watch::Receiver<Stats>,
    interval: Duration,
    started: Instant,
}

impl PeriodicReporter {
    pub fn new(snapshots: watch::Receiver<Stats>, interval: Duration) -> Self {
        Self {
            snapshots,
            interval,
            started: Instant::now(),
        }
    }

    /// Report every interval until cancelled, then wait for the aggregator to
    /// finish draining and report the final counters once more.
    pub async fn report(mut self, cancel: CancellationToken) -> Stats {
        // An interval past the end of the clock never ticks.
        let mut ticker = Instant::now().checked_add(self.interval).map(|start| {
            let mut ticker = tokio::time::interval_at(start, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = next_tick(&mut ticker) => {
                    let stats = *self.snapshots.borrow();
                    self.log("Workload statistics", &stats);
                }
            }
        }

        // The aggregator drops its sender once the counters are final.
        while self.snapshots.changed().await.is_ok() {}

        let stats = *self.snapshots.borrow();
        self.log("Final workload statistics", &stats);
        stats
    }

    fn log(&self, label: &str, stats: &Stats) {
        let elapsed = self.started.elapsed();
        info!(
            "{}: {} ({:.2} rows/sec over {:.1}s)",
            label,
            stats,
            stats.rows_per_second(elapsed),
            elapsed.as_secs_f64()
        );
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
