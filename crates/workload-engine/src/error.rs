//! Error types for the workload engine.

use thiserror::Error;

/// Errors that abort a workload run before any worker starts, or abort the
/// initial data load.
///
/// Failures of individual workload attempts never surface here; they are
/// counted in the error statistic instead.
#[derive(Error, Debug)]
pub enum WorkloadError {
    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The store could not be reached at startup.
    #[error("Store unavailable at startup: {0}")]
    Startup(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A unit of the initial data load failed.
    #[error("Failed to insert parent {index}: {source}")]
    Populate {
        index: u64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
