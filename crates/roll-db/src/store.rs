//! The attendance store.
//!
//! `AttendanceStore` owns a `RollDb` and reaches it only through
//! [`AttendanceStore::db`]; every repo method lives in an
//! `impl AttendanceStore` block under `repos/`.

use crate::RollDb;
use crate::error::DatabaseError;

/// Durable record of the directory, lecture sessions, attendance rows, and
/// the propagation outbox.
pub struct AttendanceStore {
    db: RollDb,
}

impl AttendanceStore {
    /// Open a store on a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = RollDb::open_local(path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `RollDb`.
    #[must_use]
    pub const fn from_db(db: RollDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &RollDb {
        &self.db
    }
}
