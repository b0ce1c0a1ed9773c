//! `run` command: drive the workload against MySQL until terminated.

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use workload_args::{CommonWorkloadArgs, RunArgs};
use workload_engine::{CancellationToken, ShutdownStatus, WorkloadConfig, WorkloadSummary};
use workload_generator::RandomRecordGenerator;
use workload_mysql::{pool_opts, MySqlConnectionArgs, MySqlStore};

use super::mask_connection_password;
use super::signal::cancel_on_termination;

/// Run the workload until SIGINT or SIGTERM.
pub async fn run_workload(
    connection: &MySqlConnectionArgs,
    common: &CommonWorkloadArgs,
    args: &RunArgs,
) -> anyhow::Result<()> {
    let config = args.to_config(common.resolve_seed(), common.children);
    config
        .validate()
        .context("Invalid workload configuration")?;

    let masked = mask_connection_password(&connection.connection_string());
    if args.dry_run {
        log_plan(&config, "[DRY-RUN] Would run");
        info!("[DRY-RUN] Connection: {}", masked);
        info!("[DRY-RUN] Configuration validated successfully");
        return Ok(());
    }

    info!("Connecting to MySQL at {}", masked);
    let opts = connection
        .opts()
        .context("Invalid MySQL connection options")?;
    let store = MySqlStore::new(
        opts,
        pool_opts(config.max_connections(), config.idle_connections())?,
    );

    let shutdown = CancellationToken::new();
    cancel_on_termination(shutdown.clone()).context("Failed to install signal handlers")?;

    log_plan(&config, "Running continuous workload");
    info!("Press Ctrl+C to stop");

    let summary = workload_engine::run(
        config,
        Arc::new(store.clone()),
        Arc::new(RandomRecordGenerator::new()),
        shutdown,
    )
    .await
    .context("Workload failed to start")?;

    info!(
        "Workload finished: {} in {} ms ({:.2} rows/sec)",
        summary.stats, summary.duration_ms, summary.rows_per_second
    );

    if let Some(path) = &args.summary_output {
        write_summary(&summary, path)?;
        info!("Summary written to {}", path.display());
    }

    match summary.shutdown {
        ShutdownStatus::Clean => store
            .disconnect()
            .await
            .context("Failed to close MySQL connections")?,
        // Abandoned workers still hold pooled connections.
        ShutdownStatus::TimedOut => warn!("Skipping pool disconnect after shutdown timeout"),
    }

    Ok(())
}

fn log_plan(config: &WorkloadConfig, prefix: &str) {
    info!(
        "{} with {} workers (seed={}, children per parent={}, max sleep={:?})",
        prefix, config.workers, config.seed, config.children_per_parent, config.max_sleep
    );
    info!(
        "Operation weights: insert={} update={} delete={}",
        config.mix.insert, config.mix.update, config.mix.delete
    );
}

/// Write `summary` to `path` as pretty-printed JSON.
pub fn write_summary(summary: &WorkloadSummary, path: &Path) -> anyhow::Result<()> {
    let json =
        serde_json::to_string_pretty(summary).context("Failed to serialize run summary")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write summary to {}", path.display()))?;
    Ok(())
}
