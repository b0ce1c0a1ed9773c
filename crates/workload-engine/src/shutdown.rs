//! Shutdown coordination: cooperative cancellation plus a bounded join.

use crate::stats::Stats;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// How the join barrier ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutdownStatus {
    /// Every unit finished before the deadline
    Clean,
    /// The deadline elapsed first; remaining units were abandoned
    TimedOut,
}

/// Lifecycle of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Running,
    Cancelling,
    Stopped(ShutdownStatus),
}

/// What a finished unit hands back to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitExit {
    Worker { id: usize, attempts: u64 },
    Aggregator(Stats),
    Reporter(Stats),
}

/// Result of a completed shutdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ShutdownReport {
    pub status: ShutdownStatus,
    /// Time from observing termination to the end of the join
    pub elapsed: Duration,
    /// Units that finished before the deadline
    pub joined: usize,
    /// Units still running when the deadline elapsed
    pub abandoned: usize,
    /// Total attempts reported by joined workers
    pub attempts: u64,
    /// Final counters, when the aggregator finished in time
    pub stats: Option<Stats>,
}

/// Owns every spawned unit and the cancellation token they observe.
///
/// The coordinator never aborts a unit. When the deadline elapses, units that
/// are still running are detached and left to the process exit.
pub struct ShutdownCoordinator {
    cancel: CancellationToken,
    timeout: Duration,
    units: JoinSet<UnitExit>,
    state: CoordinatorState,
}

impl ShutdownCoordinator {
    /// Create a coordinator over `cancel`, which the caller binds to its
    /// termination signals.
    pub fn new(cancel: CancellationToken, timeout: Duration) -> Self {
        Self {
            cancel,
            timeout,
            units: JoinSet::new(),
            state: CoordinatorState::Running,
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// Number of units spawned and not yet joined.
    pub fn pending(&self) -> usize {
        self.units.len()
    }

    /// Spawn a unit onto the runtime.
    pub fn spawn<F>(&mut self, unit: F)
    where
        F: Future<Output = UnitExit> + Send + 'static,
    {
        self.units.spawn(unit);
    }

    /// Block until termination, cancel every unit and join them within the
    /// deadline.
    pub async fn run(mut self) -> ShutdownReport {
        self.cancel.cancelled().await;
        info!("Termination requested, initiating graceful shutdown...");
        self.shutdown().await
    }

    /// Cancel every unit and join them within the deadline.
    pub async fn shutdown(&mut self) -> ShutdownReport {
        self.cancel.cancel();
        self.state = CoordinatorState::Cancelling;

        let started = Instant::now();
        let mut joined = 0usize;
        let mut attempts = 0u64;
        let mut stats = None;

        let deadline = tokio::time::sleep(self.timeout);
        tokio::pin!(deadline);

        let status = loop {
            tokio::select! {
                _ = &mut deadline => break ShutdownStatus::TimedOut,
                next = self.units.join_next() => match next {
                    None => break ShutdownStatus::Clean,
                    Some(Ok(exit)) => {
                        joined += 1;
                        match exit {
                            UnitExit::Worker { id, attempts: made } => {
                                debug!("Worker {} joined after {} attempts", id, made);
                                attempts += made;
                            }
                            UnitExit::Aggregator(final_stats) => stats = Some(final_stats),
                            UnitExit::Reporter(_) => debug!("Reporter joined"),
                        }
                    }
                    Some(Err(e)) => {
                        joined += 1;
                        warn!("Workload unit terminated abnormally: {}", e);
                    }
                },
            }
        };

        let abandoned = self.units.len();
        match status {
            ShutdownStatus::Clean => info!("Graceful shutdown completed"),
            ShutdownStatus::TimedOut => {
                warn!(
                    "Shutdown timed out after {} seconds, abandoning {} units",
                    self.timeout.as_secs(),
                    abandoned
                );
                self.units.detach_all();
            }
        }
        self.state = CoordinatorState::Stopped(status);

        ShutdownReport {
            status,
            elapsed: started.elapsed(),
            joined,
            abandoned,
            attempts,
            stats,
        }
    }
}
