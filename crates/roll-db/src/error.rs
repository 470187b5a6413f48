//! Database error types for roll-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB, wrong user role).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A lecture session with this id was already recorded.
    #[error("Lecture session {session_id} already exists")]
    DuplicateSession { session_id: i64 },

    /// A UNIQUE, FOREIGN KEY, CHECK, or NOT NULL constraint rejected a row.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

const CONSTRAINT_MARKERS: [&str; 4] = [
    "UNIQUE constraint failed",
    "FOREIGN KEY constraint failed",
    "CHECK constraint failed",
    "NOT NULL constraint failed",
];

impl DatabaseError {
    /// Convert a libSQL error, separating constraint failures from I/O and
    /// SQL errors.
    ///
    /// Constraint kinds share one primary result code in `SQLite`; the
    /// message tells them apart.
    #[must_use]
    pub fn classify(e: libsql::Error) -> Self {
        let msg = e.to_string();
        if CONSTRAINT_MARKERS.iter().any(|marker| msg.contains(marker)) {
            Self::ConstraintViolation(msg)
        } else {
            Self::LibSql(e)
        }
    }

    /// True if this is a UNIQUE violation on `table.column`.
    #[must_use]
    pub fn is_unique_violation_on(&self, table_column: &str) -> bool {
        match self {
            Self::ConstraintViolation(msg) => {
                msg.contains("UNIQUE constraint failed") && msg.contains(table_column)
            }
            _ => false,
        }
    }

    /// True if this is a FOREIGN KEY violation.
    #[must_use]
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation(msg) if msg.contains("FOREIGN KEY constraint failed"))
    }
}
