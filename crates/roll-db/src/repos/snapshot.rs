//! Edge-device snapshot reads: active lecturer and roster of a course.

use roll_core::snapshot::{AttendanceSnapshot, ParticipantIdentity};

use crate::error::DatabaseError;
use crate::store::AttendanceStore;

fn row_to_identity(row: &libsql::Row) -> Result<ParticipantIdentity, DatabaseError> {
    Ok(ParticipantIdentity {
        card_uid: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        unique_id: row.get::<String>(2)?,
    })
}

async fn query_active_lecturer(
    conn: &libsql::Connection,
    course_code: &str,
) -> Result<Option<ParticipantIdentity>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT u.card_uid, u.full_name, u.unique_id
             FROM course_lecturers cl JOIN users u ON u.unique_id = cl.lecturer_id
             WHERE cl.course_code = ?1 AND cl.active = 1",
            [course_code],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_identity(&row)?)),
        None => Ok(None),
    }
}

async fn query_roster(
    conn: &libsql::Connection,
    course_code: &str,
) -> Result<Vec<ParticipantIdentity>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT u.card_uid, u.full_name, u.unique_id
             FROM course_enrollments ce JOIN users u ON u.unique_id = ce.student_id
             WHERE ce.course_code = ?1
             ORDER BY u.unique_id",
            [course_code],
        )
        .await?;
    let mut students = Vec::new();
    while let Some(row) = rows.next().await? {
        students.push(row_to_identity(&row)?);
    }
    Ok(students)
}

impl AttendanceStore {
    /// The course's active lecturer, if one is assigned.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn read_active_lecturer(
        &self,
        course_code: &str,
    ) -> Result<Option<ParticipantIdentity>, DatabaseError> {
        self.db()
            .read(|conn| async move { query_active_lecturer(&conn, course_code).await })
            .await
    }

    /// The course's enrolled students, ordered by unique id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn read_roster(
        &self,
        course_code: &str,
    ) -> Result<Vec<ParticipantIdentity>, DatabaseError> {
        self.db()
            .read(|conn| async move { query_roster(&conn, course_code).await })
            .await
    }

    /// Build the edge-device snapshot for a course from one read scope.
    ///
    /// A course with no active lecturer or no students (or no such course)
    /// yields an empty snapshot, not an error. Read failures are returned.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either underlying read fails.
    pub async fn read_attendance_snapshot(
        &self,
        course_code: &str,
    ) -> Result<AttendanceSnapshot, DatabaseError> {
        let snapshot = self
            .db()
            .read(|conn| async move {
                let lecturer = query_active_lecturer(&conn, course_code).await?;
                let students = query_roster(&conn, course_code).await?;
                Ok(AttendanceSnapshot::for_course(course_code, lecturer, students))
            })
            .await?;
        tracing::debug!(
            course_code,
            empty = snapshot.is_empty(),
            "attendance snapshot read"
        );
        Ok(snapshot)
    }
}
