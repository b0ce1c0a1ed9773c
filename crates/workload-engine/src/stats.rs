//! Workload statistics and their single-writer aggregator.

use crate::outcome::OperationOutcome;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Monotonic workload counters.
///
/// `inserts` counts rows, not units: a committed unit adds its parent plus
/// every child.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub inserts: u64,
    pub updates: u64,
    pub deletes: u64,
    pub errors: u64,
}

impl Stats {
    /// Fold one outcome into the counters.
    pub fn apply(&mut self, outcome: OperationOutcome) {
        match outcome {
            OperationOutcome::Inserted { children } => self.inserts += 1 + children,
            OperationOutcome::Updated => self.updates += 1,
            OperationOutcome::Deleted => self.deletes += 1,
            OperationOutcome::Failed { .. } => self.errors += 1,
        }
    }

    /// Rows written by successful operations.
    pub fn rows_written(&self) -> u64 {
        self.inserts + self.updates + self.deletes
    }

    /// Calculate rows written per second over `elapsed`.
    pub fn rows_per_second(&self, elapsed: Duration) -> f64 {
        if elapsed.as_secs_f64() > 0.0 {
            self.rows_written() as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "inserts={} updates={} deletes={} errors={}",
            self.inserts, self.updates, self.deletes, self.errors
        )
    }
}

/// Sole owner of the workload [`Stats`].
///
/// Workers only send outcomes over the bounded channel; the aggregator is the
/// one place the counters change. Every change is published as a snapshot on
/// a watch channel for readers.
pub struct StatsAggregator {
    outcomes: mpsc::Receiver<OperationOutcome>,
    snapshots: watch::Sender<Stats>,
    stats: Stats,
}

impl StatsAggregator {
    /// Create an aggregator over `outcomes` and a receiver for its snapshots.
    pub fn new(outcomes: mpsc::Receiver<OperationOutcome>) -> (Self, watch::Receiver<Stats>) {
        let (snapshots, receiver) = watch::channel(Stats::default());
        (
            Self {
                outcomes,
                snapshots,
                stats: Stats::default(),
            },
            receiver,
        )
    }

    /// Consume outcomes until cancellation, then drain whatever workers still
    /// send until every sender is dropped. Returns the final counters.
    ///
    /// Dropping the aggregator closes the snapshot channel, which tells
    /// readers the counters are final.
    pub async fn consume(mut self, cancel: CancellationToken) -> Stats {
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                outcome = self.outcomes.recv() => match outcome {
                    Some(outcome) => self.record(outcome),
                    None => {
                        debug!("Outcome channel closed before cancellation");
                        return self.stats;
                    }
                },
            }
        }

        info!("Stats aggregator draining in-flight outcomes");
        let mut drained = 0u64;
        while let Some(outcome) = self.outcomes.recv().await {
            self.record(outcome);
            drained += 1;
        }
        debug!("Drained {} outcomes after cancellation", drained);

        self.stats
    }

    fn record(&mut self, outcome: OperationOutcome) {
        self.stats.apply(outcome);
        self.snapshots.send_replace(self.stats);
    }
}
