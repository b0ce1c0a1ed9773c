//! Operation kinds and the outcome every worker attempt produces.

use serde::{Deserialize, Serialize};

/// The closed set of write operations a worker can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Insert a parent with its children in one transaction
    Insert,
    /// Update one random parent
    Update,
    /// Delete one random parent (children cascade)
    Delete,
}

impl OperationKind {
    /// Every kind, in draw order.
    pub const ALL: [OperationKind; 3] = [
        OperationKind::Insert,
        OperationKind::Update,
        OperationKind::Delete,
    ];
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Insert => write!(f, "insert"),
            OperationKind::Update => write!(f, "update"),
            OperationKind::Delete => write!(f, "delete"),
        }
    }
}

/// Result of one worker attempt, consumed exactly once by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationOutcome {
    /// A write unit committed with this many children
    Inserted { children: u64 },
    Updated,
    Deleted,
    /// The attempt failed; the store error was logged by the worker
    Failed { kind: OperationKind },
}

impl OperationOutcome {
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationOutcome::Inserted { .. } => OperationKind::Insert,
            OperationOutcome::Updated => OperationKind::Update,
            OperationOutcome::Deleted => OperationKind::Delete,
            OperationOutcome::Failed { kind } => *kind,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, OperationOutcome::Failed { .. })
    }
}
