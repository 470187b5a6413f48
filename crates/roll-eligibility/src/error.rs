//! Error types for the eligibility subsystem.

use roll_db::error::DatabaseError;
use thiserror::Error;

/// Errors from applying or reading eligibility state.
#[derive(Debug, Error)]
pub enum EligibilityError {
    /// The ledger's storage failed.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// The batch conflicts with what the ledger already recorded.
    #[error("Eligibility batch rejected: {0}")]
    Rejected(String),
}
