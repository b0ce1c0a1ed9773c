//! Immutable workload configuration.

use crate::error::WorkloadError;
use crate::outcome::OperationKind;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of concurrent workers.
pub const DEFAULT_WORKERS: usize = 5;

/// Default children inserted with every parent.
pub const DEFAULT_CHILDREN_PER_PARENT: usize = 5;

/// Default upper bound of the jittered pause between attempts.
pub const DEFAULT_MAX_SLEEP: Duration = Duration::from_millis(1000);

/// Default cadence of the periodic statistics report.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(10);

/// Default deadline for joining all units at shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest accepted report interval.
pub const MAX_REPORT_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Relative weights of the operation kinds a worker draws from.
///
/// Weights are normalized by their sum, so `{insert: 70, update: 20,
/// delete: 10}` and `{insert: 7, update: 2, delete: 1}` select identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationMix {
    pub insert: u32,
    pub update: u32,
    pub delete: u32,
}

impl Default for OperationMix {
    fn default() -> Self {
        Self::insert_only()
    }
}

impl OperationMix {
    pub fn new(insert: u32, update: u32, delete: u32) -> Self {
        Self {
            insert,
            update,
            delete,
        }
    }

    /// Every attempt is an insert.
    pub fn insert_only() -> Self {
        Self::new(100, 0, 0)
    }

    pub fn weight(&self, kind: OperationKind) -> u32 {
        match kind {
            OperationKind::Insert => self.insert,
            OperationKind::Update => self.update,
            OperationKind::Delete => self.delete,
        }
    }

    pub fn total(&self) -> u64 {
        OperationKind::ALL
            .iter()
            .map(|kind| u64::from(self.weight(*kind)))
            .sum()
    }

    /// Normalized probability of `kind`.
    pub fn share(&self, kind: OperationKind) -> f64 {
        match self.total() {
            0 => 0.0,
            total => f64::from(self.weight(kind)) / total as f64,
        }
    }

    /// Draw one operation kind. Always consumes exactly one value from `rng`.
    ///
    /// An all-zero mix falls back to [`OperationKind::Insert`]; validated
    /// configurations never contain one.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> OperationKind {
        let total = self.total().max(1);
        let mut point = rng.gen_range(0..total);
        for kind in OperationKind::ALL {
            let weight = u64::from(self.weight(kind));
            if point < weight {
                return kind;
            }
            point -= weight;
        }
        OperationKind::Insert
    }
}

/// Configuration for one workload run, built once and passed to every unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Number of concurrent workers
    pub workers: usize,
    /// Base seed; worker `i` uses `seed + i`
    pub seed: u64,
    /// Children inserted with every parent
    pub children_per_parent: usize,
    /// Exclusive upper bound of the random pause between attempts
    pub max_sleep: Duration,
    /// Interval between statistics reports
    pub report_interval: Duration,
    /// Deadline for joining all units after cancellation
    pub shutdown_timeout: Duration,
    /// Operation kind weights
    pub mix: OperationMix,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            seed: 0,
            children_per_parent: DEFAULT_CHILDREN_PER_PARENT,
            max_sleep: DEFAULT_MAX_SLEEP,
            report_interval: DEFAULT_REPORT_INTERVAL,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            mix: OperationMix::default(),
        }
    }
}

impl WorkloadConfig {
    /// Check the configuration before any unit is started.
    pub fn validate(&self) -> Result<(), WorkloadError> {
        if self.workers == 0 {
            return Err(WorkloadError::Config(
                "worker count must be at least 1".to_string(),
            ));
        }
        if self.mix.total() == 0 {
            return Err(WorkloadError::Config(
                "at least one operation weight must be positive".to_string(),
            ));
        }
        if self.report_interval.is_zero() {
            return Err(WorkloadError::Config(
                "report interval must be positive".to_string(),
            ));
        }
        if self.report_interval > MAX_REPORT_INTERVAL {
            return Err(WorkloadError::Config(format!(
                "report interval must not exceed {} seconds",
                MAX_REPORT_INTERVAL.as_secs()
            )));
        }
        Ok(())
    }

    /// Capacity of the outcome channel: one slot per worker.
    pub fn outcome_channel_capacity(&self) -> usize {
        self.workers.max(1)
    }

    /// Maximum pooled store connections (`2 × workers`).
    pub fn max_connections(&self) -> usize {
        self.workers * 2
    }

    /// Idle connection cap (half of the maximum).
    pub fn idle_connections(&self) -> usize {
        self.max_connections() / 2
    }
}
