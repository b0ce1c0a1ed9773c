//! Store contracts consumed by workers.
//!
//! A [`TransactionalStore`] hands out one [`WriteTransaction`] per write
//! unit. Rows inserted through a transaction become visible only when
//! [`WriteTransaction::commit`] succeeds; a rollback or a dropped
//! transaction discards all of them.

use async_trait::async_trait;
use tracing::debug;
use workload_generator::{FieldValue, Record, WriteUnit};

/// A store that executes write units atomically.
#[async_trait]
pub trait TransactionalStore: Send + Sync {
    /// Error reported by the backend.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Transaction handle for one write unit.
    type Unit: WriteTransaction<Error = Self::Error>;

    /// Verify the store is reachable. Called once before any worker starts.
    async fn check_connection(&self) -> Result<(), Self::Error>;

    /// Open a transaction for one write unit.
    async fn begin_unit(&self) -> Result<Self::Unit, Self::Error>;

    /// Apply `assignments` to one randomly chosen parent. Returns rows affected.
    async fn update_random_parent(
        &self,
        assignments: &[(String, FieldValue)],
    ) -> Result<u64, Self::Error>;

    /// Delete one randomly chosen parent and its children. Returns rows affected.
    async fn delete_random_parent(&self) -> Result<u64, Self::Error>;
}

/// One open transaction, owned by a single worker.
#[async_trait]
pub trait WriteTransaction: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn insert_parent(&mut self, parent: &Record) -> Result<(), Self::Error>;

    async fn insert_child(&mut self, parent_id: i64, child: &Record) -> Result<(), Self::Error>;

    /// Commit every row of the unit. Returns rows affected.
    async fn commit(self) -> Result<u64, Self::Error>;

    async fn rollback(self) -> Result<(), Self::Error>;
}

/// Write one unit inside a single transaction.
///
/// Any failed insert rolls the transaction back, so either every row of the
/// unit is committed or none is.
pub async fn write_unit<S>(store: &S, unit: &WriteUnit) -> Result<u64, S::Error>
where
    S: TransactionalStore + ?Sized,
{
    let mut tx = store.begin_unit().await?;

    match insert_rows(&mut tx, unit).await {
        Ok(()) => tx.commit().await,
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                debug!("Rollback after failed insert also failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}

async fn insert_rows<T: WriteTransaction>(tx: &mut T, unit: &WriteUnit) -> Result<(), T::Error> {
    tx.insert_parent(&unit.parent).await?;
    for child in &unit.children {
        tx.insert_child(unit.parent.id, child).await?;
    }
    Ok(())
}
