//! `init` command: recreate the tables and load the initial parents.

use anyhow::Context;
use tracing::info;
use workload_args::{CommonWorkloadArgs, InitArgs};
use workload_engine::{populate, TransactionalStore};
use workload_generator::RandomRecordGenerator;
use workload_mysql::{pool_opts, MySqlConnectionArgs, MySqlStore};

use super::mask_connection_password;

/// Drop and recreate `parent_records` / `child_records`, then insert
/// `--parents` units of `--children` children each.
pub async fn run_init(
    connection: &MySqlConnectionArgs,
    common: &CommonWorkloadArgs,
    args: &InitArgs,
) -> anyhow::Result<()> {
    let seed = common.resolve_seed();
    let masked = mask_connection_password(&connection.connection_string());

    if args.dry_run {
        info!(
            "[DRY-RUN] Would recreate tables and insert {} parents with {} children each (seed={})",
            common.parents, common.children, seed
        );
        info!("[DRY-RUN] Connection: {}", masked);
        return Ok(());
    }

    info!("Connecting to MySQL at {}", masked);
    let opts = connection
        .opts()
        .context("Invalid MySQL connection options")?;
    let store = MySqlStore::new(opts, pool_opts(1, 1)?);
    store
        .check_connection()
        .await
        .context("Failed to connect to MySQL")?;

    info!("Creating tables...");
    store
        .recreate_tables()
        .await
        .context("Failed to create tables")?;

    info!("Initializing data...");
    let metrics = populate(
        &store,
        &RandomRecordGenerator::new(),
        seed,
        common.parents,
        common.children,
    )
    .await
    .context("Failed to initialize data")?;

    store
        .disconnect()
        .await
        .context("Failed to close MySQL connections")?;

    info!(
        "Initialization complete: {} parents, {} rows",
        metrics.units_inserted, metrics.rows_inserted
    );
    Ok(())
}
