//! Lecture session repository.
//!
//! Writes a session header, its attendance rows, and its outbox entry as one
//! atomic unit; reads them back by id or course.

use chrono::Utc;

use roll_core::entities::{AttendanceRecord, LectureSession, LectureSessionDetail};
use roll_core::submission::AttendanceSessionSubmission;

use crate::error::DatabaseError;
use crate::helpers::{get_flag, parse_datetime};
use crate::store::AttendanceStore;

const SESSION_COLUMNS: &str = "id, course_code, lecturer_id, session_date, created_at";

fn row_to_session(row: &libsql::Row) -> Result<LectureSession, DatabaseError> {
    Ok(LectureSession {
        id: row.get::<i64>(0)?,
        course_code: row.get::<String>(1)?,
        lecturer_id: row.get::<String>(2)?,
        session_date: parse_datetime(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

fn row_to_record(row: &libsql::Row) -> Result<AttendanceRecord, DatabaseError> {
    Ok(AttendanceRecord {
        session_id: row.get::<i64>(0)?,
        student_id: row.get::<String>(1)?,
        attendance_time: parse_datetime(&row.get::<String>(2)?)?,
        attended: get_flag(row, 3)?,
    })
}

async fn query_session(
    conn: &libsql::Connection,
    session_id: i64,
) -> Result<Option<LectureSession>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SESSION_COLUMNS} FROM lecture_sessions WHERE id = ?1"),
            [session_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_session(&row)?)),
        None => Ok(None),
    }
}

async fn query_records(
    conn: &libsql::Connection,
    session_id: i64,
) -> Result<Vec<AttendanceRecord>, DatabaseError> {
    // rowid order is insertion order, i.e. the order of the submission.
    let mut rows = conn
        .query(
            "SELECT session_id, student_id, attendance_time, attended
             FROM lecture_attendance WHERE session_id = ?1 ORDER BY rowid",
            [session_id],
        )
        .await?;
    let mut records = Vec::new();
    while let Some(row) = rows.next().await? {
        records.push(row_to_record(&row)?);
    }
    Ok(records)
}

impl AttendanceStore {
    /// Atomically insert one lecture session, all of its attendance rows,
    /// and a `pending` propagation outbox entry.
    ///
    /// Either every row becomes visible or none does. `records` may be empty.
    /// Every student, the lecturer, and the course must already exist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateSession` if the session id is taken,
    /// `DatabaseError::ConstraintViolation` for any other rejected row, or
    /// `DatabaseError` for I/O failures. Nothing is committed on error.
    pub async fn write_session_atomic(
        &self,
        submission: &AttendanceSessionSubmission,
    ) -> Result<LectureSessionDetail, DatabaseError> {
        let now = Utc::now();
        let session = LectureSession {
            id: submission.session_id,
            course_code: submission.course_code.clone(),
            lecturer_id: submission.lecturer_id.clone(),
            session_date: submission.session_date,
            created_at: now,
        };
        let records: Vec<AttendanceRecord> = submission
            .attendance_data
            .iter()
            .map(|entry| AttendanceRecord {
                session_id: submission.session_id,
                student_id: entry.student_id.clone(),
                attendance_time: entry.attendance_time,
                attended: entry.attended,
            })
            .collect();

        let (session_ref, records_ref) = (&session, &records);
        self.db()
            .transaction(|conn| async move {
                conn.execute(
                    "INSERT INTO lecture_sessions (id, course_code, lecturer_id, session_date, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    libsql::params![
                        session_ref.id,
                        session_ref.course_code.as_str(),
                        session_ref.lecturer_id.as_str(),
                        session_ref.session_date.to_rfc3339(),
                        session_ref.created_at.to_rfc3339()
                    ],
                )
                .await
                .map_err(|e| {
                    let classified = DatabaseError::classify(e);
                    if classified.is_unique_violation_on("lecture_sessions.id") {
                        DatabaseError::DuplicateSession {
                            session_id: session_ref.id,
                        }
                    } else {
                        classified
                    }
                })?;

                for record in records_ref {
                    conn.execute(
                        "INSERT INTO lecture_attendance (session_id, student_id, attendance_time, attended)
                         VALUES (?1, ?2, ?3, ?4)",
                        libsql::params![
                            record.session_id,
                            record.student_id.as_str(),
                            record.attendance_time.to_rfc3339(),
                            i64::from(record.attended)
                        ],
                    )
                    .await
                    .map_err(DatabaseError::classify)?;
                }

                conn.execute(
                    "INSERT INTO propagation_outbox (session_id, status, attempts, updated_at)
                     VALUES (?1, 'pending', 0, ?2)",
                    libsql::params![session_ref.id, now.to_rfc3339()],
                )
                .await
                .map_err(DatabaseError::classify)?;

                Ok(())
            })
            .await?;

        tracing::info!(
            session_id = session.id,
            course_code = %session.course_code,
            records = records.len(),
            "lecture session recorded"
        );

        Ok(LectureSessionDetail { session, records })
    }

    /// Get a lecture session header by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the session does not exist.
    pub async fn get_lecture_session(&self, session_id: i64) -> Result<LectureSession, DatabaseError> {
        self.db()
            .read(|conn| async move {
                query_session(&conn, session_id)
                    .await?
                    .ok_or(DatabaseError::NoResult)
            })
            .await
    }

    /// Get the attendance rows of a session, in submission order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_lecture_attendance(
        &self,
        session_id: i64,
    ) -> Result<Vec<AttendanceRecord>, DatabaseError> {
        self.db()
            .read(|conn| async move { query_records(&conn, session_id).await })
            .await
    }

    /// Get a session header together with its attendance rows, read in one scope.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the session does not exist.
    pub async fn get_lecture_session_detail(
        &self,
        session_id: i64,
    ) -> Result<LectureSessionDetail, DatabaseError> {
        self.db()
            .read(|conn| async move {
                let session = query_session(&conn, session_id)
                    .await?
                    .ok_or(DatabaseError::NoResult)?;
                let records = query_records(&conn, session_id).await?;
                Ok(LectureSessionDetail { session, records })
            })
            .await
    }

    /// List a course's sessions, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_lecture_sessions(
        &self,
        course_code: &str,
    ) -> Result<Vec<LectureSession>, DatabaseError> {
        self.db()
            .read(|conn| async move {
                let mut rows = conn
                    .query(
                        &format!(
                            "SELECT {SESSION_COLUMNS} FROM lecture_sessions
                             WHERE course_code = ?1 ORDER BY session_date, id"
                        ),
                        [course_code],
                    )
                    .await?;
                let mut sessions = Vec::new();
                while let Some(row) = rows.next().await? {
                    sessions.push(row_to_session(&row)?);
                }
                Ok(sessions)
            })
            .await
    }
}
