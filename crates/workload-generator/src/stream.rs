//! Per-worker deterministic random streams.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Deterministic pseudo-random sequence owned by a single worker.
///
/// The stream is keyed by `base_seed + worker_index`, so the same base seed
/// and worker count always reproduce the same per-worker sequences no matter
/// how the workers are scheduled.
#[derive(Debug, Clone)]
pub struct SeededStream {
    base_seed: u64,
    worker_index: u64,
    rng: StdRng,
}

impl SeededStream {
    /// Create the stream for `worker_index` under `base_seed`.
    pub fn new(base_seed: u64, worker_index: usize) -> Self {
        let worker_index = worker_index as u64;
        Self {
            base_seed,
            worker_index,
            rng: StdRng::seed_from_u64(base_seed.wrapping_add(worker_index)),
        }
    }

    /// The base seed shared by every worker of a run.
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Index of the worker owning this stream.
    pub fn worker_index(&self) -> u64 {
        self.worker_index
    }

    /// The effective PRNG key (`base_seed + worker_index`, wrapping).
    pub fn key(&self) -> u64 {
        self.base_seed.wrapping_add(self.worker_index)
    }
}

impl RngCore for SeededStream {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}
