//! Workload workers.

use crate::config::{OperationMix, WorkloadConfig};
use crate::outcome::{OperationKind, OperationOutcome};
use crate::store::{write_unit, TransactionalStore};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use workload_generator::{RecordGenerator, SeededStream};

/// One independent load generator.
///
/// A worker owns its [`SeededStream`]; operation choice, payloads and pause
/// lengths are all drawn from it.
pub struct Worker<S: ?Sized, G: ?Sized> {
    id: usize,
    stream: SeededStream,
    store: Arc<S>,
    generator: Arc<G>,
    mix: OperationMix,
    children_per_parent: usize,
    max_sleep: Duration,
}

impl<S, G> Worker<S, G>
where
    S: TransactionalStore + ?Sized,
    G: RecordGenerator + ?Sized,
{
    pub fn new(id: usize, config: &WorkloadConfig, store: Arc<S>, generator: Arc<G>) -> Self {
        Self {
            id,
            stream: SeededStream::new(config.seed, id),
            store,
            generator,
            mix: config.mix,
            children_per_parent: config.children_per_parent,
            max_sleep: config.max_sleep,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Loop until `cancel` fires, sending exactly one outcome per attempt.
    ///
    /// Cancellation is only observed between attempts, so an attempt that
    /// has started always runs to commit or rollback. Returns the number of
    /// attempts made.
    pub async fn run(
        mut self,
        cancel: CancellationToken,
        outcomes: mpsc::Sender<OperationOutcome>,
    ) -> u64 {
        let mut attempts = 0u64;
        debug!("Worker {} started (stream key {})", self.id, self.stream.key());

        loop {
            if cancel.is_cancelled() {
                break;
            }

            let outcome = self.attempt().await;
            attempts += 1;

            if outcomes.send(outcome).await.is_err() {
                warn!("Worker {} - stats aggregator is gone, stopping", self.id);
                break;
            }

            if cancel.is_cancelled() {
                break;
            }

            let pause = self.next_pause();
            if pause.is_zero() {
                tokio::task::yield_now().await;
                continue;
            }
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(pause) => {}
            }
        }

        debug!("Worker {} stopped after {} attempts", self.id, attempts);
        attempts
    }

    /// Perform one randomly chosen operation.
    pub async fn attempt(&mut self) -> OperationOutcome {
        let kind = self.mix.choose(&mut self.stream);
        let result = match kind {
            OperationKind::Insert => {
                let unit = self
                    .generator
                    .next_unit(&mut self.stream, self.children_per_parent);
                write_unit(self.store.as_ref(), &unit)
                    .await
                    .map(|_| OperationOutcome::Inserted {
                        children: unit.child_count(),
                    })
            }
            OperationKind::Update => {
                let assignments = self.generator.next_parent_update(&mut self.stream);
                self.store
                    .update_random_parent(&assignments)
                    .await
                    .map(|_| OperationOutcome::Updated)
            }
            OperationKind::Delete => self
                .store
                .delete_random_parent()
                .await
                .map(|_| OperationOutcome::Deleted),
        };

        result.unwrap_or_else(|e| {
            warn!("Worker {} - Error during {}: {}", self.id, kind, e);
            OperationOutcome::Failed { kind }
        })
    }

    /// Uniform pause in `[0, max_sleep)` at millisecond granularity.
    fn next_pause(&mut self) -> Duration {
        let max_ms = self.max_sleep.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(self.stream.gen_range(0..max_ms))
    }
}
