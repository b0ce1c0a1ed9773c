//! [`TransactionalStore`] over a `mysql_async` connection pool.

use crate::ddl;
use crate::error::MySqlStoreError;
use crate::sql::{self, Statement};
use async_trait::async_trait;
use mysql_async::prelude::*;
use mysql_async::{Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts, Transaction, TxOpts};
use std::time::Duration;
use tracing::{debug, info};
use workload_engine::{TransactionalStore, WriteTransaction};
use workload_generator::{FieldValue, Record};

/// Maximum lifetime of a pooled connection.
pub const CONNECTION_LIFETIME: Duration = Duration::from_secs(5 * 60);

/// Pool options allowing `max` open connections and keeping `idle` warm.
pub fn pool_opts(max: usize, idle: usize) -> Result<PoolOpts, MySqlStoreError> {
    let constraints = PoolConstraints::new(idle.min(max), max)
        .filter(|_| max > 0)
        .ok_or_else(|| {
            MySqlStoreError::Config(format!("invalid pool size: idle={idle}, max={max}"))
        })?;

    Ok(PoolOpts::default()
        .with_constraints(constraints)
        .with_abs_conn_ttl(Some(CONNECTION_LIFETIME)))
}

/// MySQL-backed store for the `parent_records` / `child_records` tables.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: Pool,
}

impl MySqlStore {
    /// Create a store over a new pool. No connection is opened until first use.
    pub fn new(opts: Opts, pool_opts: PoolOpts) -> Self {
        let opts = OptsBuilder::from_opts(opts).pool_opts(pool_opts);
        Self {
            pool: Pool::new(opts),
        }
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Drop and recreate both workload tables.
    pub async fn recreate_tables(&self) -> Result<(), MySqlStoreError> {
        let mut conn = self.pool.get_conn().await?;
        for statement in ddl::recreate_statements() {
            debug!("Executing DDL: {}", statement);
            conn.query_drop(statement.as_str()).await?;
        }
        info!(
            "Created tables `{}` and `{}`",
            ddl::PARENT_TABLE,
            ddl::CHILD_TABLE
        );
        Ok(())
    }

    /// Close every pooled connection.
    pub async fn disconnect(self) -> Result<(), MySqlStoreError> {
        self.pool.disconnect().await?;
        Ok(())
    }

    /// Run a single-statement mutation outside a unit, failing when it
    /// matched nothing.
    async fn exec_affecting(
        &self,
        statement: Statement,
        operation: &'static str,
    ) -> Result<u64, MySqlStoreError> {
        let mut conn = self.pool.get_conn().await?;
        conn.exec_drop(statement.sql.as_str(), statement.params()).await?;

        match conn.affected_rows() {
            0 => Err(MySqlStoreError::NoRowsAffected(operation)),
            rows => Ok(rows),
        }
    }
}

#[async_trait]
impl TransactionalStore for MySqlStore {
    type Error = MySqlStoreError;
    type Unit = MySqlUnit;

    async fn check_connection(&self) -> Result<(), Self::Error> {
        let mut conn = self.pool.get_conn().await?;
        conn.ping().await?;
        Ok(())
    }

    async fn begin_unit(&self) -> Result<Self::Unit, Self::Error> {
        let tx = self.pool.start_transaction(TxOpts::default()).await?;
        Ok(MySqlUnit { tx, rows: 0 })
    }

    async fn update_random_parent(
        &self,
        assignments: &[(String, FieldValue)],
    ) -> Result<u64, Self::Error> {
        if assignments.is_empty() {
            return Err(MySqlStoreError::Config(
                "update requires at least one column".to_string(),
            ));
        }
        self.exec_affecting(sql::update_random_parent(assignments), "update")
            .await
    }

    async fn delete_random_parent(&self) -> Result<u64, Self::Error> {
        self.exec_affecting(sql::delete_random_parent(), "delete")
            .await
    }
}

/// One open MySQL transaction. Dropping it without committing rolls back.
pub struct MySqlUnit {
    tx: Transaction<'static>,
    rows: u64,
}

impl MySqlUnit {
    async fn exec(&mut self, statement: Statement) -> Result<(), MySqlStoreError> {
        self.tx.exec_drop(statement.sql.as_str(), statement.params()).await?;
        self.rows += self.tx.affected_rows();
        Ok(())
    }
}

#[async_trait]
impl WriteTransaction for MySqlUnit {
    type Error = MySqlStoreError;

    async fn insert_parent(&mut self, parent: &Record) -> Result<(), Self::Error> {
        self.exec(sql::insert_parent(parent)).await
    }

    async fn insert_child(&mut self, parent_id: i64, child: &Record) -> Result<(), Self::Error> {
        self.exec(sql::insert_child(parent_id, child)).await
    }

    async fn commit(self) -> Result<u64, Self::Error> {
        self.tx.commit().await?;
        Ok(self.rows)
    }

    async fn rollback(self) -> Result<(), Self::Error> {
        self.tx.rollback().await?;
        Ok(())
    }
}
