//! MySQL backend for the workload engine.
//!
//! Provides [`MySqlStore`], a [`workload_engine::TransactionalStore`] over a
//! `mysql_async` connection pool, plus the DDL for the `parent_records` and
//! `child_records` tables.

pub mod args;
pub mod ddl;
pub mod error;
pub mod sql;
pub mod store;
pub mod value;

pub use args::MySqlConnectionArgs;
pub use error::MySqlStoreError;
pub use store::{pool_opts, MySqlStore, MySqlUnit};
