//! mysql-workload
//!
//! A synthetic write-load generator for MySQL. `init` creates the
//! `parent_records` / `child_records` tables and loads an initial set of
//! parents; `run` starts a pool of workers that keep inserting seeded
//! parent-with-children units (and, if weighted in, random updates and
//! deletes) until SIGINT or SIGTERM, then shuts down within a bounded
//! deadline.
//!
//! # CLI Usage
//!
//! ```bash
//! # Recreate tables and insert 100 parents with 5 children each
//! mysql-workload --host localhost --user root --dbname test_db --parents 100 init
//!
//! # Run 8 workers with a fixed seed, writing a summary on exit
//! mysql-workload --seed 42 run --workers 8 --summary-output summary.json
//! ```

pub mod cli;
pub mod workload;

pub use cli::{Cli, Commands};
