//! Service-level error taxonomy.
//!
//! Callers decide what to do next from the variant alone:
//!
//! | Variant            | Committed | Resubmit? |
//! |--------------------|-----------|-----------|
//! | `Validation`       | no        | after fixing the payload |
//! | `DuplicateSession` | earlier   | no |
//! | `Persistence`      | no        | yes |
//! | `Propagation`      | yes       | no, retry propagation |
//! | `SessionNotFound`  | n/a       | n/a |

use std::time::Duration;

use roll_core::errors::ValidationError;
use roll_db::error::DatabaseError;
use roll_eligibility::EligibilityError;
use thiserror::Error;

/// Why eligibility state was not updated for a committed session.
#[derive(Debug, Error)]
pub enum PropagationFailure {
    /// The propagator returned an error.
    #[error("propagator rejected the batch: {0}")]
    Rejected(#[source] EligibilityError),

    /// The propagator did not answer in time.
    #[error("propagator timed out after {after:?}")]
    TimedOut { after: Duration },
}

/// Errors from the attendance services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The submission was rejected before any I/O.
    #[error("Invalid submission: {0}")]
    Validation(#[from] ValidationError),

    /// A session with this id is already recorded.
    #[error("Lecture session {session_id} already exists")]
    DuplicateSession { session_id: i64 },

    /// The store failed; nothing was committed.
    #[error("Attendance store failed: {0}")]
    Persistence(#[source] DatabaseError),

    /// The session is committed but eligibility state was not updated.
    #[error("Lecture session {session_id} recorded, eligibility not updated: {cause}")]
    Propagation {
        session_id: i64,
        #[source]
        cause: PropagationFailure,
    },

    /// No session with this id exists.
    #[error("Lecture session {session_id} not found")]
    SessionNotFound { session_id: i64 },
}

impl From<DatabaseError> for ServiceError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::DuplicateSession { session_id } => Self::DuplicateSession { session_id },
            other => Self::Persistence(other),
        }
    }
}

impl ServiceError {
    /// Stable identifier for logs and CLI output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::DuplicateSession { .. } => "duplicate_session",
            Self::Persistence(_) => "persistence",
            Self::Propagation { .. } => "propagation",
            Self::SessionNotFound { .. } => "session_not_found",
        }
    }

    /// True if the same submission may be sent again.
    ///
    /// `Validation` qualifies only once the payload is corrected.
    #[must_use]
    pub const fn is_retry_safe(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Persistence(_))
    }

    /// True if the session is durably recorded despite the error.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Propagation { .. })
    }
}
