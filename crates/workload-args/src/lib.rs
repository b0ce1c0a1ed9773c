//! CLI argument definitions shared by the `init` and `run` commands.
//!
//! Arguments are parsed once and converted into an immutable
//! [`WorkloadConfig`]; nothing downstream reads flags directly.

use chrono::Utc;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use workload_engine::{config, OperationMix, WorkloadConfig};

/// Arguments shared by every command.
#[derive(Args, Clone, Debug)]
pub struct CommonWorkloadArgs {
    /// Random seed for deterministic generation (0 = derive from the current time)
    #[arg(long, default_value = "0", global = true)]
    pub seed: u64,

    /// Number of parent records to insert during `init`
    #[arg(long, default_value = "10", global = true)]
    pub parents: u64,

    /// Number of child records per parent
    #[arg(long, default_value_t = config::DEFAULT_CHILDREN_PER_PARENT, global = true)]
    pub children: usize,
}

impl CommonWorkloadArgs {
    /// The seed to use for this invocation.
    ///
    /// Call once and reuse the result: a zero seed resolves to the current
    /// time and changes on every call.
    pub fn resolve_seed(&self) -> u64 {
        resolve_seed(self.seed)
    }
}

/// Map the "0 = now" seed convention onto a concrete seed.
pub fn resolve_seed(seed: u64) -> u64 {
    if seed != 0 {
        return seed;
    }
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64;
    nanos.max(1)
}

/// Arguments for the `init` command.
#[derive(Args, Clone, Debug, Default)]
pub struct InitArgs {
    /// Dry-run mode: log what would be created without connecting
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `run` command.
#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Number of concurrent workers
    #[arg(long, default_value_t = config::DEFAULT_WORKERS)]
    pub workers: usize,

    /// Upper bound of the random pause between attempts, in milliseconds
    #[arg(long, default_value = "1000")]
    pub max_sleep_ms: u64,

    /// Seconds between statistics reports
    #[arg(long, default_value = "10")]
    pub report_interval_secs: u64,

    /// Seconds to wait for workers after termination is requested
    #[arg(long, default_value = "30")]
    pub shutdown_timeout_secs: u64,

    /// Relative weight of parent-with-children inserts
    #[arg(long, default_value = "100")]
    pub insert_weight: u32,

    /// Relative weight of random parent updates
    #[arg(long, default_value = "0")]
    pub update_weight: u32,

    /// Relative weight of random parent deletes
    #[arg(long, default_value = "0")]
    pub delete_weight: u32,

    /// Write the final run summary as JSON to this path
    #[arg(long)]
    pub summary_output: Option<PathBuf>,

    /// Dry-run mode: validate configuration and log the plan without connecting
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Build the workload configuration for an already resolved `seed`.
    pub fn to_config(&self, seed: u64, children_per_parent: usize) -> WorkloadConfig {
        WorkloadConfig {
            workers: self.workers,
            seed,
            children_per_parent,
            max_sleep: Duration::from_millis(self.max_sleep_ms),
            report_interval: Duration::from_secs(self.report_interval_secs),
            shutdown_timeout: Duration::from_secs(self.shutdown_timeout_secs),
            mix: OperationMix::new(self.insert_weight, self.update_weight, self.delete_weight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        common: CommonWorkloadArgs,
        #[command(flatten)]
        run: RunArgs,
    }

    #[test]
    fn test_defaults_match_engine_defaults() {
        let cli = TestCli::parse_from(["test"]);
        let config = cli.run.to_config(7, cli.common.children);

        assert_eq!(config, WorkloadConfig { seed: 7, ..Default::default() });
        assert_eq!(cli.common.parents, 10);
        assert!(cli.run.summary_output.is_none());
    }

    #[test]
    fn test_overrides() {
        let cli = TestCli::parse_from([
            "test",
            "--workers",
            "12",
            "--children",
            "3",
            "--max-sleep-ms",
            "250",
            "--update-weight",
            "20",
            "--delete-weight",
            "5",
            "--shutdown-timeout-secs",
            "2",
        ]);
        let config = cli.run.to_config(1, cli.common.children);

        assert_eq!(config.workers, 12);
        assert_eq!(config.children_per_parent, 3);
        assert_eq!(config.max_sleep, Duration::from_millis(250));
        assert_eq!(config.shutdown_timeout, Duration::from_secs(2));
        assert_eq!(config.mix, OperationMix::new(100, 20, 5));
    }

    #[test]
    fn test_explicit_seed_is_kept() {
        assert_eq!(resolve_seed(42), 42);
    }

    #[test]
    fn test_zero_seed_resolves_to_time() {
        assert_ne!(resolve_seed(0), 0);
    }
}
