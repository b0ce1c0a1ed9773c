//! Record generator for the mysql-workload engine.
//!
//! This crate provides the per-worker [`SeededStream`] and the
//! [`RecordGenerator`] contract used by workers to build write units. The
//! default implementation, [`RandomRecordGenerator`], produces the parent and
//! child payloads inserted into `parent_records` and `child_records`.
//!
//! # Architecture
//!
//! ```text
//!   base seed + worker index
//!            │
//!            ▼
//!   ┌─────────────────┐
//!   │  SeededStream   │  (one per worker, never shared)
//!   └────────┬────────┘
//!            │
//!            ▼
//!   ┌─────────────────┐
//!   │ RecordGenerator │
//!   └────────┬────────┘
//!            │
//!            ▼
//!   WriteUnit { parent: Record, children: Vec<Record> }
//! ```
//!
//! # Example
//!
//! ```rust
//! use workload_generator::{RandomRecordGenerator, RecordGenerator, SeededStream};
//!
//! let generator = RandomRecordGenerator::new();
//! let mut stream = SeededStream::new(42, 0);
//! let unit = generator.next_unit(&mut stream, 5);
//! assert_eq!(unit.child_count(), 5);
//! ```

pub mod generator;
pub mod generators;
pub mod stream;
pub mod values;

// Re-exports for convenience
pub use generator::{Clock, RandomRecordGenerator, RecordGenerator};
pub use stream::SeededStream;
pub use values::{FieldValue, Record, WriteUnit};
