//! Cross-cutting error types for Rollcall.
//!
//! Storage, eligibility, and service errors are defined in their respective
//! crates. Validation lives here because it runs before any crate does I/O.

use thiserror::Error;

/// A submission was rejected before touching any store.
///
/// Always safe to retry once the input has been corrected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The payload could not be decoded (missing or ill-typed field).
    #[error("Malformed submission: {0}")]
    Malformed(String),

    /// A required field is present but empty.
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Session identities are caller-assigned positive integers.
    #[error("Invalid session id {0}: must be a positive integer")]
    InvalidSessionId(i64),

    /// The same student appears more than once in one submission.
    #[error("Duplicate attendance entry for student {student_id}")]
    DuplicateStudent { student_id: String },
}

impl ValidationError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}
