//! libSQL-backed eligibility ledger.
//!
//! Facts are stored per `(session_id, student_id)`, so re-applying a batch
//! overwrites rows instead of adding them. After every apply the course's
//! standings are recomputed from the stored facts:
//!
//! - a student's percentage is attended lectures over all lectures recorded
//!   for the course, rounded to two decimals
//! - a lecturer's availability is the number of lectures they delivered

use chrono::Utc;
use roll_core::entities::{EligibilityBatch, LecturerAvailability, StudentEligibility};
use roll_db::error::DatabaseError;
use roll_db::helpers::get_flag;
use roll_db::{Migration, RollDb};

use crate::error::EligibilityError;
use crate::propagator::EligibilityPropagator;

/// Eligibility ledger schema.
pub const ELIGIBILITY_MIGRATIONS: &[Migration] = &[Migration {
    name: "001_eligibility",
    sql: include_str!("../migrations/001_eligibility.sql"),
}];

/// Attendance percentage of `attended` out of `total` lectures, rounded to
/// two decimals. Zero lectures yields `0.0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn eligibility_percent(attended: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let ratio = attended as f64 / total as f64;
    (ratio * 10_000.0).round() / 100.0
}

/// Eligibility state in its own database.
pub struct EligibilityLedger {
    db: RollDb,
    min_attendance_percent: f64,
}

impl EligibilityLedger {
    /// Open (or create) the ledger at `path` (`:memory:` for tests).
    ///
    /// # Errors
    ///
    /// Returns `EligibilityError::Database` if the database cannot be opened
    /// or its migrations fail.
    pub async fn open_local(path: &str, min_attendance_percent: f64) -> Result<Self, EligibilityError> {
        let db = RollDb::open_local_with(path, ELIGIBILITY_MIGRATIONS).await?;
        Ok(Self {
            db,
            min_attendance_percent,
        })
    }

    #[must_use]
    pub const fn min_attendance_percent(&self) -> f64 {
        self.min_attendance_percent
    }

    /// Record one session's facts and recompute its course.
    ///
    /// Returns `true` if the session was new to the ledger, `false` if it had
    /// already been applied.
    ///
    /// # Errors
    ///
    /// Returns `EligibilityError::Rejected` if the session was already
    /// applied for a different course or lecturer, or
    /// `EligibilityError::Database` if storage fails. Nothing changes on error.
    pub async fn apply_batch(&self, batch: &EligibilityBatch) -> Result<bool, EligibilityError> {
        let now = Utc::now().to_rfc3339();
        let min = self.min_attendance_percent;
        let now_ref = now.as_str();

        let newly_recorded = self
            .db
            .transaction(|conn| async move {
                let inserted = conn
                    .execute(
                        "INSERT OR IGNORE INTO eligibility_lectures (session_id, course_code, lecturer_id, applied_at)
                         VALUES (?1, ?2, ?3, ?4)",
                        libsql::params![
                            batch.session_id,
                            batch.course_code.as_str(),
                            batch.lecturer_id.as_str(),
                            now_ref
                        ],
                    )
                    .await?;
                if inserted == 0 {
                    ensure_same_lecture(&conn, batch).await?;
                }

                for fact in &batch.facts {
                    conn.execute(
                        "INSERT INTO eligibility_facts (session_id, student_id, attended) VALUES (?1, ?2, ?3)
                         ON CONFLICT (session_id, student_id) DO UPDATE SET attended = excluded.attended",
                        libsql::params![
                            batch.session_id,
                            fact.student_id.as_str(),
                            i64::from(fact.attended)
                        ],
                    )
                    .await?;
                }

                recompute_course(&conn, &batch.course_code, min, now_ref).await?;
                Ok(inserted > 0)
            })
            .await
            .map_err(|e| match e {
                DatabaseError::InvalidState(reason) => EligibilityError::Rejected(reason),
                other => EligibilityError::Database(other),
            })?;

        tracing::info!(
            session_id = batch.session_id,
            course_code = %batch.course_code,
            facts = batch.facts.len(),
            newly_recorded,
            "eligibility batch applied"
        );
        Ok(newly_recorded)
    }

    /// Standings of every student with recorded facts in a course, by student id.
    ///
    /// # Errors
    ///
    /// Returns `EligibilityError::Database` if the query fails.
    pub async fn course_eligibility(
        &self,
        course_code: &str,
    ) -> Result<Vec<StudentEligibility>, EligibilityError> {
        let standings = self
            .db
            .read(|conn| async move {
                let mut rows = conn
                    .query(
                        "SELECT course_code, student_id, lectures_attended, lectures_total, eligibility, eligible
                         FROM student_eligibility WHERE course_code = ?1 ORDER BY student_id",
                        [course_code],
                    )
                    .await?;
                let mut standings = Vec::new();
                while let Some(row) = rows.next().await? {
                    standings.push(row_to_eligibility(&row)?);
                }
                Ok(standings)
            })
            .await?;
        Ok(standings)
    }

    /// Standing of one student in one course, if any facts were recorded.
    ///
    /// # Errors
    ///
    /// Returns `EligibilityError::Database` if the query fails.
    pub async fn student_eligibility(
        &self,
        course_code: &str,
        student_id: &str,
    ) -> Result<Option<StudentEligibility>, EligibilityError> {
        let standing = self
            .db
            .read(|conn| async move {
                let mut rows = conn
                    .query(
                        "SELECT course_code, student_id, lectures_attended, lectures_total, eligibility, eligible
                         FROM student_eligibility WHERE course_code = ?1 AND student_id = ?2",
                        [course_code, student_id],
                    )
                    .await?;
                match rows.next().await? {
                    Some(row) => Ok(Some(row_to_eligibility(&row)?)),
                    None => Ok(None),
                }
            })
            .await?;
        Ok(standing)
    }

    /// Lectures a lecturer delivered for a course, if any were recorded.
    ///
    /// # Errors
    ///
    /// Returns `EligibilityError::Database` if the query fails.
    pub async fn lecturer_availability(
        &self,
        course_code: &str,
        lecturer_id: &str,
    ) -> Result<Option<LecturerAvailability>, EligibilityError> {
        let availability = self
            .db
            .read(|conn| async move {
                let mut rows = conn
                    .query(
                        "SELECT course_code, lecturer_id, lectures_delivered
                         FROM lecturer_availability WHERE course_code = ?1 AND lecturer_id = ?2",
                        [course_code, lecturer_id],
                    )
                    .await?;
                match rows.next().await? {
                    Some(row) => Ok(Some(LecturerAvailability {
                        course_code: row.get::<String>(0)?,
                        lecturer_id: row.get::<String>(1)?,
                        lectures_delivered: row.get::<i64>(2)?,
                    })),
                    None => Ok(None),
                }
            })
            .await?;
        Ok(availability)
    }
}

impl EligibilityPropagator for EligibilityLedger {
    async fn apply(&self, batch: &EligibilityBatch) -> Result<(), EligibilityError> {
        self.apply_batch(batch).await.map(|_| ())
    }
}

fn row_to_eligibility(row: &libsql::Row) -> Result<StudentEligibility, DatabaseError> {
    Ok(StudentEligibility {
        course_code: row.get::<String>(0)?,
        student_id: row.get::<String>(1)?,
        lectures_attended: row.get::<i64>(2)?,
        lectures_total: row.get::<i64>(3)?,
        eligibility: row.get::<f64>(4)?,
        eligible: get_flag(row, 5)?,
    })
}

/// A session id re-applied under a different course or lecturer is a conflict.
async fn ensure_same_lecture(
    conn: &libsql::Connection,
    batch: &EligibilityBatch,
) -> Result<(), DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT course_code, lecturer_id FROM eligibility_lectures WHERE session_id = ?1",
            [batch.session_id],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    let course_code = row.get::<String>(0)?;
    let lecturer_id = row.get::<String>(1)?;
    if course_code == batch.course_code && lecturer_id == batch.lecturer_id {
        Ok(())
    } else {
        Err(DatabaseError::InvalidState(format!(
            "session {} was applied for {course_code}/{lecturer_id}, not {}/{}",
            batch.session_id, batch.course_code, batch.lecturer_id
        )))
    }
}

async fn recompute_course(
    conn: &libsql::Connection,
    course_code: &str,
    min_attendance_percent: f64,
    now: &str,
) -> Result<(), DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT COUNT(*) FROM eligibility_lectures WHERE course_code = ?1",
            [course_code],
        )
        .await?;
    let total = rows
        .next()
        .await?
        .ok_or(DatabaseError::NoResult)?
        .get::<i64>(0)?;

    let mut rows = conn
        .query(
            "SELECT f.student_id, SUM(f.attended)
             FROM eligibility_facts f JOIN eligibility_lectures l ON l.session_id = f.session_id
             WHERE l.course_code = ?1
             GROUP BY f.student_id",
            [course_code],
        )
        .await?;
    let mut tallies = Vec::new();
    while let Some(row) = rows.next().await? {
        tallies.push((row.get::<String>(0)?, row.get::<i64>(1)?));
    }

    for (student_id, attended) in tallies {
        let percent = eligibility_percent(attended, total);
        let eligible = percent >= min_attendance_percent;
        conn.execute(
            "INSERT INTO student_eligibility
                 (course_code, student_id, lectures_attended, lectures_total, eligibility, eligible, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT (course_code, student_id) DO UPDATE SET
                 lectures_attended = excluded.lectures_attended,
                 lectures_total = excluded.lectures_total,
                 eligibility = excluded.eligibility,
                 eligible = excluded.eligible,
                 updated_at = excluded.updated_at",
            libsql::params![
                course_code,
                student_id.as_str(),
                attended,
                total,
                percent,
                i64::from(eligible),
                now
            ],
        )
        .await?;
    }

    let mut rows = conn
        .query(
            "SELECT lecturer_id, COUNT(*) FROM eligibility_lectures
             WHERE course_code = ?1 GROUP BY lecturer_id",
            [course_code],
        )
        .await?;
    let mut delivered = Vec::new();
    while let Some(row) = rows.next().await? {
        delivered.push((row.get::<String>(0)?, row.get::<i64>(1)?));
    }

    for (lecturer_id, lectures) in delivered {
        conn.execute(
            "INSERT INTO lecturer_availability (course_code, lecturer_id, lectures_delivered, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (course_code, lecturer_id) DO UPDATE SET
                 lectures_delivered = excluded.lectures_delivered,
                 updated_at = excluded.updated_at",
            libsql::params![course_code, lecturer_id.as_str(), lectures, now],
        )
        .await?;
    }

    tracing::debug!(course_code, lectures = total, "course eligibility recomputed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 0, 0.0)]
    #[case(0, 4, 0.0)]
    #[case(1, 2, 50.0)]
    #[case(2, 3, 66.67)]
    #[case(3, 4, 75.0)]
    #[case(5, 5, 100.0)]
    fn percent_is_rounded_to_two_decimals(
        #[case] attended: i64,
        #[case] total: i64,
        #[case] expected: f64,
    ) {
        assert!((eligibility_percent(attended, total) - expected).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn open_local_creates_ledger_schema() {
        let ledger = EligibilityLedger::open_local(":memory:", 75.0).await.unwrap();
        assert!((ledger.min_attendance_percent() - 75.0).abs() < f64::EPSILON);
        assert!(ledger.course_eligibility("CS101").await.unwrap().is_empty());
        assert!(
            ledger
                .lecturer_availability("CS101", "L1")
                .await
                .unwrap()
                .is_none()
        );
    }
}
