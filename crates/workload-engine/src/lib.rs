//! Concurrent write workload engine.
//!
//! The engine runs a pool of workers that repeatedly write seeded, randomized
//! units to a [`TransactionalStore`], counts their outcomes in a single-writer
//! [`StatsAggregator`], reports the counters periodically, and shuts down
//! within a bounded deadline once the caller cancels its token.
//!
//! # Architecture
//!
//! ```text
//!                  CancellationToken (bound to SIGINT/SIGTERM by the caller)
//!                          │
//!   ┌──────────┐           ▼
//!   │ Worker 0 │──┐   ┌─────────────────────┐
//!   ├──────────┤  │   │ ShutdownCoordinator │  join barrier vs. deadline
//!   │ Worker 1 │──┤   └─────────────────────┘
//!   ├──────────┤  │ outcomes (bounded, capacity = workers)
//!   │ Worker N │──┘
//!   └──────────┘  ▼
//!          ┌─────────────────┐  snapshots  ┌──────────────────┐
//!          │ StatsAggregator │────────────▶│ PeriodicReporter │
//!          └─────────────────┘   (watch)   └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! let shutdown = CancellationToken::new();
//! let summary = workload_engine::run(
//!     WorkloadConfig { workers: 3, seed: 42, ..Default::default() },
//!     Arc::new(store),
//!     Arc::new(RandomRecordGenerator::new()),
//!     shutdown,
//! )
//! .await?;
//! println!("{}", summary.stats);
//! ```

pub mod config;
pub mod error;
pub mod outcome;
pub mod populate;
pub mod reporter;
pub mod runner;
pub mod shutdown;
pub mod stats;
pub mod store;
pub mod worker;

pub use config::{OperationMix, WorkloadConfig};
pub use error::WorkloadError;
pub use outcome::{OperationKind, OperationOutcome};
pub use populate::{populate, PopulateMetrics};
pub use reporter::PeriodicReporter;
pub use runner::{run, WorkloadSummary};
pub use shutdown::{CoordinatorState, ShutdownCoordinator, ShutdownReport, ShutdownStatus, UnitExit};
pub use stats::{Stats, StatsAggregator};
pub use store::{write_unit, TransactionalStore, WriteTransaction};
pub use worker::Worker;

// Re-exported so callers need not depend on tokio-util directly.
pub use tokio_util::sync::CancellationToken;
