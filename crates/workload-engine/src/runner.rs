//! Wiring of workers, aggregator, reporter and shutdown coordinator.

use crate::config::{OperationMix, WorkloadConfig};
use crate::error::WorkloadError;
use crate::reporter::PeriodicReporter;
use crate::shutdown::{ShutdownCoordinator, ShutdownStatus, UnitExit};
use crate::stats::{Stats, StatsAggregator};
use crate::store::TransactionalStore;
use crate::worker::Worker;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;
use workload_generator::RecordGenerator;

/// Summary of a finished workload run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadSummary {
    pub workers: usize,
    pub seed: u64,
    pub children_per_parent: usize,
    pub mix: OperationMix,
    pub stats: Stats,
    pub shutdown: ShutdownStatus,
    /// Worker attempts counted at join (abandoned workers excluded)
    pub attempts: u64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub rows_per_second: f64,
}

/// Run the workload until `shutdown` is cancelled.
///
/// The caller binds `shutdown` to its termination signals. Only startup
/// problems (invalid configuration, unreachable store) are returned as
/// errors; failed attempts are counted and a timed-out shutdown is reported
/// in the summary.
pub async fn run<S, G>(
    config: WorkloadConfig,
    store: Arc<S>,
    generator: Arc<G>,
    shutdown: CancellationToken,
) -> Result<WorkloadSummary, WorkloadError>
where
    S: TransactionalStore + ?Sized + 'static,
    G: RecordGenerator + ?Sized + 'static,
{
    config.validate()?;
    store
        .check_connection()
        .await
        .map_err(|e| WorkloadError::Startup(Box::new(e)))?;

    let started_at = Utc::now();
    let start = Instant::now();

    let (outcome_tx, outcome_rx) = mpsc::channel(config.outcome_channel_capacity());
    let (aggregator, snapshots) = StatsAggregator::new(outcome_rx);
    let reporter = PeriodicReporter::new(snapshots.clone(), config.report_interval);

    let mut coordinator = ShutdownCoordinator::new(shutdown, config.shutdown_timeout);

    let token = coordinator.token();
    coordinator.spawn(async move { UnitExit::Aggregator(aggregator.consume(token).await) });

    let token = coordinator.token();
    coordinator.spawn(async move { UnitExit::Reporter(reporter.report(token).await) });

    for id in 0..config.workers {
        let worker = Worker::new(id, &config, store.clone(), generator.clone());
        let token = coordinator.token();
        let outcomes = outcome_tx.clone();
        coordinator.spawn(async move {
            let id = worker.id();
            let attempts = worker.run(token, outcomes).await;
            UnitExit::Worker { id, attempts }
        });
    }
    // Workers hold the only senders; the channel closes once they all exit.
    drop(outcome_tx);

    info!(
        "Running workload with {} workers (seed={}, children per parent={}, mix={:?})",
        config.workers, config.seed, config.children_per_parent, config.mix
    );

    let report = coordinator.run().await;

    // A timed-out aggregator leaves the last published snapshot.
    let stats = report.stats.unwrap_or_else(|| *snapshots.borrow());
    let elapsed = start.elapsed();
    if report.status == ShutdownStatus::TimedOut {
        info!("Workload statistics at shutdown: {}", stats);
    }

    Ok(WorkloadSummary {
        workers: config.workers,
        seed: config.seed,
        children_per_parent: config.children_per_parent,
        mix: config.mix,
        stats,
        shutdown: report.status,
        attempts: report.attempts,
        started_at,
        completed_at: Utc::now(),
        duration_ms: elapsed.as_millis() as u64,
        rows_per_second: stats.rows_per_second(elapsed),
    })
}
