//! In-memory store used by the engine tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::Id;
use workload_engine::{CancellationToken, TransactionalStore, WriteTransaction};
use workload_generator::{FieldValue, Record};

#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("injected failure on attempt {0}")]
    Injected(u64),
    #[error("no parent matched")]
    NoRowsAffected,
    #[error("store unreachable")]
    Unreachable,
}

/// A committed write unit: the parent id and the parent id each child was
/// linked to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedUnit {
    pub parent_id: i64,
    pub child_parent_ids: Vec<i64>,
}

#[derive(Default)]
pub struct MockState {
    pub attempts: AtomicU64,
    pub committed: AtomicU64,
    pub failed: AtomicU64,
    pub rolled_back: AtomicU64,
    pub visible_rows: AtomicU64,
    pub commits_started: AtomicU64,
    pub updates: AtomicU64,
    pub deletes: AtomicU64,
    /// Attempts per calling task; each worker runs in its own task
    pub attempts_by_task: Mutex<HashMap<Option<Id>, u64>>,
    pub units: Mutex<Vec<CommittedUnit>>,
}

/// Store whose behaviour is scripted per test.
#[derive(Default)]
pub struct MockStore {
    pub state: Arc<MockState>,
    /// Fail a task's attempt `n` when `n % fail_every == 0`
    fail_every: Option<u64>,
    /// Cancel the token once this many attempts have begun
    cancel_after: Option<(u64, CancellationToken)>,
    /// Commits never return
    block_commit: bool,
    /// Updates and deletes match no parent
    empty_table: bool,
    unreachable: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_every(mut self, n: u64) -> Self {
        self.fail_every = Some(n);
        self
    }

    pub fn cancel_after(mut self, attempts: u64, token: CancellationToken) -> Self {
        self.cancel_after = Some((attempts, token));
        self
    }

    pub fn block_commit(mut self) -> Self {
        self.block_commit = true;
        self
    }

    pub fn empty_table(mut self) -> Self {
        self.empty_table = true;
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn attempts(&self) -> u64 {
        self.state.attempts.load(Ordering::SeqCst)
    }

    pub fn committed(&self) -> u64 {
        self.state.committed.load(Ordering::SeqCst)
    }

    pub fn failed(&self) -> u64 {
        self.state.failed.load(Ordering::SeqCst)
    }

    pub fn rolled_back(&self) -> u64 {
        self.state.rolled_back.load(Ordering::SeqCst)
    }

    pub fn visible_rows(&self) -> u64 {
        self.state.visible_rows.load(Ordering::SeqCst)
    }

    pub fn commits_started(&self) -> u64 {
        self.state.commits_started.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> u64 {
        self.state.updates.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> u64 {
        self.state.deletes.load(Ordering::SeqCst)
    }

    /// Attempts made by each worker task.
    pub fn attempts_per_worker(&self) -> Vec<u64> {
        self.state
            .attempts_by_task
            .lock()
            .unwrap()
            .values()
            .copied()
            .collect()
    }

    /// Units that committed, in commit order.
    pub fn units(&self) -> Vec<CommittedUnit> {
        self.state.units.lock().unwrap().clone()
    }

    /// Count one attempt and decide whether it fails. The failure schedule
    /// follows the calling task's own attempt count, so it does not depend
    /// on how workers interleave.
    fn next_attempt(&self) -> (u64, bool) {
        let total = self.state.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((limit, token)) = &self.cancel_after {
            if total >= *limit {
                token.cancel();
            }
        }

        let mut by_task = self.state.attempts_by_task.lock().unwrap();
        let n = by_task.entry(tokio::task::try_id()).or_default();
        *n += 1;
        let fail = self.fail_every.is_some_and(|every| *n % every == 0);
        (total, fail)
    }
}

pub struct MockTransaction {
    state: Arc<MockState>,
    attempt: u64,
    fail: bool,
    block_commit: bool,
    staged_rows: u64,
    staged: Option<CommittedUnit>,
}

#[async_trait]
impl TransactionalStore for MockStore {
    type Error = MockError;
    type Unit = MockTransaction;

    async fn check_connection(&self) -> Result<(), MockError> {
        if self.unreachable {
            Err(MockError::Unreachable)
        } else {
            Ok(())
        }
    }

    async fn begin_unit(&self) -> Result<MockTransaction, MockError> {
        let (attempt, fail) = self.next_attempt();
        Ok(MockTransaction {
            state: self.state.clone(),
            attempt,
            fail,
            block_commit: self.block_commit,
            staged_rows: 0,
            staged: None,
        })
    }

    async fn update_random_parent(
        &self,
        _assignments: &[(String, FieldValue)],
    ) -> Result<u64, MockError> {
        let (attempt, fail) = self.next_attempt();
        if self.empty_table {
            return Err(MockError::NoRowsAffected);
        }
        if fail {
            self.state.failed.fetch_add(1, Ordering::SeqCst);
            return Err(MockError::Injected(attempt));
        }
        self.state.updates.fetch_add(1, Ordering::SeqCst);
        Ok(1)
    }

    async fn delete_random_parent(&self) -> Result<u64, MockError> {
        let (attempt, fail) = self.next_attempt();
        if self.empty_table {
            return Err(MockError::NoRowsAffected);
        }
        if fail {
            self.state.failed.fetch_add(1, Ordering::SeqCst);
            return Err(MockError::Injected(attempt));
        }
        self.state.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(1)
    }
}

#[async_trait]
impl WriteTransaction for MockTransaction {
    type Error = MockError;

    async fn insert_parent(&mut self, parent: &Record) -> Result<(), MockError> {
        if self.fail {
            self.state.failed.fetch_add(1, Ordering::SeqCst);
            return Err(MockError::Injected(self.attempt));
        }
        self.staged_rows += 1;
        self.staged = Some(CommittedUnit {
            parent_id: parent.id,
            child_parent_ids: Vec::new(),
        });
        Ok(())
    }

    async fn insert_child(&mut self, parent_id: i64, _child: &Record) -> Result<(), MockError> {
        self.staged_rows += 1;
        if let Some(unit) = self.staged.as_mut() {
            unit.child_parent_ids.push(parent_id);
        }
        Ok(())
    }

    async fn commit(self) -> Result<u64, MockError> {
        if self.block_commit {
            self.state.commits_started.fetch_add(1, Ordering::SeqCst);
            std::future::pending::<()>().await;
        }
        self.state
            .visible_rows
            .fetch_add(self.staged_rows, Ordering::SeqCst);
        self.state.committed.fetch_add(1, Ordering::SeqCst);
        if let Some(unit) = self.staged {
            self.state.units.lock().unwrap().push(unit);
        }
        Ok(self.staged_rows)
    }

    async fn rollback(self) -> Result<(), MockError> {
        self.state.rolled_back.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
