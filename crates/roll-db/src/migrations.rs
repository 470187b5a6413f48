//! Database migration runner.
//!
//! Embeds SQL migration files at compile time and executes them on database
//! open. All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::RollDb;
use crate::error::DatabaseError;

/// A named, embedded migration script.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub name: &'static str,
    pub sql: &'static str,
}

/// Attendance schema: directory, sessions, attendance rows, propagation outbox.
pub const ATTENDANCE_MIGRATIONS: &[Migration] = &[Migration {
    name: "001_attendance",
    sql: include_str!("../migrations/001_attendance.sql"),
}];

impl RollDb {
    /// Run a migration set in sequence.
    pub(crate) async fn run_migrations(
        &self,
        migrations: &[Migration],
    ) -> Result<(), DatabaseError> {
        for migration in migrations {
            self.conn
                .execute_batch(migration.sql)
                .await
                .map_err(|e| DatabaseError::Migration(format!("{}: {e}", migration.name)))?;
        }
        Ok(())
    }
}
