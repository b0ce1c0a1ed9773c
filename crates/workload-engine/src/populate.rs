//! Initial data load used by the `init` command.

use crate::error::WorkloadError;
use crate::store::{write_unit, TransactionalStore};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};
use workload_generator::{RecordGenerator, SeededStream};

/// Log progress every this many parents.
pub const PROGRESS_EVERY: u64 = 10;

/// Metrics from an initial load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulateMetrics {
    /// Number of write units committed.
    pub units_inserted: u64,
    /// Number of rows (parents plus children) committed.
    pub rows_inserted: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

impl PopulateMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Insert `parents` write units of `children` children each, sequentially,
/// from a single stream keyed by `seed`.
///
/// Unlike the running workload, the first failed unit aborts the load.
pub async fn populate<S, G>(
    store: &S,
    generator: &G,
    seed: u64,
    parents: u64,
    children: usize,
) -> Result<PopulateMetrics, WorkloadError>
where
    S: TransactionalStore + ?Sized,
    G: RecordGenerator + ?Sized,
{
    let start = Instant::now();
    let mut stream = SeededStream::new(seed, 0);
    let mut metrics = PopulateMetrics::default();

    info!(
        "Populating {} parents with {} children each (seed={})",
        parents, children, seed
    );

    for index in 0..parents {
        let unit = generator.next_unit(&mut stream, children);
        write_unit(store, &unit)
            .await
            .map_err(|e| WorkloadError::Populate {
                index,
                source: Box::new(e),
            })?;

        metrics.units_inserted += 1;
        metrics.rows_inserted += unit.row_count();
        debug!("Inserted parent {} ({} rows)", unit.parent.id, unit.row_count());

        if index > 0 && index % PROGRESS_EVERY == 0 {
            info!("Inserted {} parents...", index);
        }
    }

    metrics.total_duration = start.elapsed();
    info!(
        "Population complete: {} rows in {:?} ({:.2} rows/sec)",
        metrics.rows_inserted,
        metrics.total_duration,
        metrics.rows_per_second()
    );

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let metrics = PopulateMetrics {
            units_inserted: 100,
            rows_inserted: 600,
            total_duration: Duration::from_secs(6),
        };

        assert_eq!(metrics.rows_per_second(), 100.0);
        assert_eq!(PopulateMetrics::default().rows_per_second(), 0.0);
    }
}
