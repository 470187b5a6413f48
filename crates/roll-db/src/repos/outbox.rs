//! Propagation outbox repository.
//!
//! Every committed session carries one outbox row. It starts `pending` in the
//! same transaction as the session and moves to `applied` once the
//! eligibility subsystem accepted the session's facts.

use chrono::Utc;

use roll_core::entities::PropagationState;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum};
use crate::store::AttendanceStore;

fn row_to_state(row: &libsql::Row) -> Result<PropagationState, DatabaseError> {
    Ok(PropagationState {
        session_id: row.get::<i64>(0)?,
        status: parse_enum(&row.get::<String>(1)?)?,
        attempts: row.get::<i64>(2)?,
        last_error: get_opt_string(row, 3)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl AttendanceStore {
    /// Get the outbox entry of a session.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the session has no outbox entry.
    pub async fn get_propagation_state(
        &self,
        session_id: i64,
    ) -> Result<PropagationState, DatabaseError> {
        self.db()
            .read(|conn| async move {
                let mut rows = conn
                    .query(
                        "SELECT session_id, status, attempts, last_error, updated_at
                         FROM propagation_outbox WHERE session_id = ?1",
                        [session_id],
                    )
                    .await?;
                let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
                row_to_state(&row)
            })
            .await
    }

    /// Record a successful propagation. Re-marking an applied entry is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the session has no outbox entry.
    pub async fn mark_propagation_applied(&self, session_id: i64) -> Result<(), DatabaseError> {
        let now = Utc::now();
        self.db()
            .transaction(|conn| async move {
                let changed = conn
                    .execute(
                        "UPDATE propagation_outbox
                         SET status = 'applied', attempts = attempts + 1, last_error = NULL, updated_at = ?1
                         WHERE session_id = ?2 AND status = 'pending'",
                        libsql::params![now.to_rfc3339(), session_id],
                    )
                    .await?;
                if changed == 0 {
                    ensure_outbox_entry(&conn, session_id).await?;
                }
                Ok(())
            })
            .await
    }

    /// Record a failed propagation attempt; the entry stays `pending`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the session has no outbox entry.
    pub async fn record_propagation_failure(
        &self,
        session_id: i64,
        error: &str,
    ) -> Result<(), DatabaseError> {
        let now = Utc::now();
        self.db()
            .transaction(|conn| async move {
                let changed = conn
                    .execute(
                        "UPDATE propagation_outbox
                         SET attempts = attempts + 1, last_error = ?1, updated_at = ?2
                         WHERE session_id = ?3 AND status = 'pending'",
                        libsql::params![error, now.to_rfc3339(), session_id],
                    )
                    .await?;
                if changed == 0 {
                    ensure_outbox_entry(&conn, session_id).await?;
                }
                Ok(())
            })
            .await
    }

    /// List pending entries, least recently attempted first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_pending_propagations(
        &self,
        limit: u32,
    ) -> Result<Vec<PropagationState>, DatabaseError> {
        self.db()
            .read(|conn| async move {
                let mut rows = conn
                    .query(
                        "SELECT session_id, status, attempts, last_error, updated_at
                         FROM propagation_outbox WHERE status = 'pending'
                         ORDER BY updated_at, session_id LIMIT ?1",
                        [i64::from(limit)],
                    )
                    .await?;
                let mut pending = Vec::new();
                while let Some(row) = rows.next().await? {
                    pending.push(row_to_state(&row)?);
                }
                Ok(pending)
            })
            .await
    }
}

async fn ensure_outbox_entry(
    conn: &libsql::Connection,
    session_id: i64,
) -> Result<(), DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT 1 FROM propagation_outbox WHERE session_id = ?1",
            [session_id],
        )
        .await?;
    rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(())
}
