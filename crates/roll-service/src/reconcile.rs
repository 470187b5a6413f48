//! Outcome of a reconciliation sweep over pending propagations.

use serde::Serialize;

/// One session that still could not be propagated.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReconcileFailure {
    pub session_id: i64,
    pub error: String,
}

/// Sessions applied and sessions still failing after one sweep.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ReconcileReport {
    pub applied: Vec<i64>,
    pub failed: Vec<ReconcileFailure>,
}

impl ReconcileReport {
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.applied.len() + self.failed.len()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
