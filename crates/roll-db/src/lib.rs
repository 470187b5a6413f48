//! # roll-db
//!
//! libSQL persistence for Rollcall attendance.
//!
//! Holds the directory (users, courses, lecturer assignments, enrollments),
//! lecture sessions with their attendance rows, and the propagation outbox.
//! All units of work on a database run through [`RollDb::transaction`] or
//! [`RollDb::read`], which serialize access to the single connection so no
//! reader ever observes a half-written session.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod store;

use std::future::Future;

use error::DatabaseError;
use libsql::{Builder, TransactionBehavior};
use tokio::sync::Mutex;

pub use migrations::{ATTENDANCE_MIGRATIONS, Migration};
pub use store::AttendanceStore;

/// Central database handle.
///
/// Wraps a libSQL database, its connection, and a gate that every unit of
/// work acquires before touching the connection.
pub struct RollDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    gate: Mutex<()>,
}

impl RollDb {
    /// Open a local attendance database at the given path (`:memory:` for tests).
    ///
    /// Runs the attendance migrations automatically.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open_local_with(path, ATTENDANCE_MIGRATIONS).await
    }

    /// Open a local database and apply the given migration set.
    ///
    /// Other subsystems use this to keep their own schema in their own file.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local_with(
        path: &str,
        migrations: &'static [Migration],
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let roll_db = Self {
            db,
            conn,
            gate: Mutex::new(()),
        };
        roll_db.run_migrations(migrations).await?;
        Ok(roll_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    ///
    /// Bypasses the gate; meant for tests and diagnostics only.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Run `work` inside one IMMEDIATE transaction.
    ///
    /// Commits when `work` returns `Ok`, rolls back and returns the error
    /// otherwise. If an earlier unit of work panicked with its transaction
    /// still open, that transaction is rolled back before this one begins.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or `DatabaseError` if the
    /// transaction cannot be started or committed.
    pub async fn transaction<T, F, Fut>(&self, work: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(libsql::Connection) -> Fut,
        Fut: Future<Output = Result<T, DatabaseError>>,
    {
        let _gate = self.gate.lock().await;
        self.rollback_abandoned().await?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?;

        match work(self.conn.clone()).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback_error) = tx.rollback().await {
                    tracing::warn!(
                        %error,
                        %rollback_error,
                        "transaction: rollback failed after unit of work error"
                    );
                }
                Err(error)
            }
        }
    }

    /// Run read-only `work` with exclusive use of the connection.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`.
    pub async fn read<T, F, Fut>(&self, work: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(libsql::Connection) -> Fut,
        Fut: Future<Output = Result<T, DatabaseError>>,
    {
        let _gate = self.gate.lock().await;
        self.rollback_abandoned().await?;
        work(self.conn.clone()).await
    }

    async fn rollback_abandoned(&self) -> Result<(), DatabaseError> {
        if !self.conn.is_autocommit() {
            tracing::warn!("rolling back transaction abandoned by an earlier unit of work");
            self.conn.execute("ROLLBACK", ()).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> RollDb {
        RollDb::open_local(":memory:").await.unwrap()
    }

    async fn count(db: &RollDb, table: &str) -> i64 {
        let mut rows = db
            .conn()
            .query(&format!("SELECT COUNT(*) FROM {table}"), ())
            .await
            .unwrap();
        rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "users",
            "courses",
            "course_lecturers",
            "course_enrollments",
            "lecture_sessions",
            "lecture_attendance",
            "propagation_outbox",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations(ATTENDANCE_MIGRATIONS).await.unwrap();
    }

    #[tokio::test]
    async fn transaction_commits_on_ok() {
        let db = test_db().await;

        db.transaction(|conn| async move {
            conn.execute(
                "INSERT INTO courses (code, title) VALUES ('CS101', 'Intro')",
                (),
            )
            .await?;
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(count(&db, "courses").await, 1);
        assert!(db.conn().is_autocommit());
    }

    #[tokio::test]
    async fn transaction_rolls_back_on_err() {
        let db = test_db().await;

        let result: Result<(), DatabaseError> = db
            .transaction(|conn| async move {
                conn.execute(
                    "INSERT INTO courses (code, title) VALUES ('CS101', 'Intro')",
                    (),
                )
                .await?;
                Err(DatabaseError::InvalidState("abort".into()))
            })
            .await;

        assert!(matches!(result, Err(DatabaseError::InvalidState(_))));
        assert_eq!(count(&db, "courses").await, 0);
        assert!(db.conn().is_autocommit());
    }

    #[tokio::test]
    async fn abandoned_transaction_is_rolled_back_before_next_unit() {
        let db = test_db().await;

        // Simulate a unit of work that died with its transaction open.
        db.conn().execute("BEGIN", ()).await.unwrap();
        db.conn()
            .execute(
                "INSERT INTO courses (code, title) VALUES ('GHOST', 'never committed')",
                (),
            )
            .await
            .unwrap();

        let titles = db
            .read(|conn| async move {
                let mut rows = conn.query("SELECT COUNT(*) FROM courses", ()).await?;
                let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
                Ok(row.get::<i64>(0)?)
            })
            .await
            .unwrap();

        assert_eq!(titles, 0);
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = test_db().await;

        let err = db
            .conn()
            .execute(
                "INSERT INTO course_enrollments (course_code, student_id) VALUES ('NOPE', 'S404')",
                (),
            )
            .await
            .unwrap_err();

        assert!(DatabaseError::classify(err).is_foreign_key_violation());
    }

    #[tokio::test]
    async fn attendance_pair_is_unique() {
        let db = test_db().await;
        db.conn()
            .execute_batch(
                "INSERT INTO users (unique_id, card_uid, full_name, role) VALUES
                     ('L1', 'C-L1', 'Lecturer One', 'lecturer'),
                     ('S1', 'C-S1', 'Student One', 'student');
                 INSERT INTO courses (code, title) VALUES ('CS101', 'Intro');
                 INSERT INTO lecture_sessions (id, course_code, lecturer_id, session_date, created_at)
                     VALUES (1, 'CS101', 'L1', '2026-03-02T09:00:00Z', '2026-03-02T09:00:00Z');
                 INSERT INTO lecture_attendance (session_id, student_id, attendance_time, attended)
                     VALUES (1, 'S1', '2026-03-02T09:01:00Z', 1);",
            )
            .await
            .unwrap();

        let err = db
            .conn()
            .execute(
                "INSERT INTO lecture_attendance (session_id, student_id, attendance_time, attended)
                 VALUES (1, 'S1', '2026-03-02T09:02:00Z', 0)",
                (),
            )
            .await
            .unwrap_err();

        let classified = DatabaseError::classify(err);
        assert!(
            classified.is_unique_violation_on("lecture_attendance.session_id"),
            "got {classified:?}"
        );
    }
}
