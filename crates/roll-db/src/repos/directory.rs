//! Directory repository: users, courses, lecturer assignments, enrollments.
//!
//! The attendance write path depends on these rows through foreign keys;
//! the snapshot read path projects them for edge devices.

use roll_core::entities::{Course, User};
use roll_core::enums::UserRole;

use crate::error::DatabaseError;
use crate::helpers::parse_enum;
use crate::store::AttendanceStore;

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        unique_id: row.get::<String>(0)?,
        card_uid: row.get::<String>(1)?,
        full_name: row.get::<String>(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
    })
}

async fn require_role(
    conn: &libsql::Connection,
    unique_id: &str,
    expected: UserRole,
) -> Result<(), DatabaseError> {
    let mut rows = conn
        .query("SELECT role FROM users WHERE unique_id = ?1", [unique_id])
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    let role: UserRole = parse_enum(&row.get::<String>(0)?)?;
    if role == expected {
        Ok(())
    } else {
        Err(DatabaseError::InvalidState(format!(
            "user {unique_id} is a {role}, expected {expected}"
        )))
    }
}

impl AttendanceStore {
    /// Register a student or lecturer.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::ConstraintViolation` if the unique id or card
    /// UID is already registered.
    pub async fn register_user(&self, user: &User) -> Result<(), DatabaseError> {
        self.db()
            .transaction(|conn| async move {
                conn.execute(
                    "INSERT INTO users (unique_id, card_uid, full_name, role) VALUES (?1, ?2, ?3, ?4)",
                    libsql::params![
                        user.unique_id.as_str(),
                        user.card_uid.as_str(),
                        user.full_name.as_str(),
                        user.role.as_str()
                    ],
                )
                .await
                .map_err(DatabaseError::classify)?;
                Ok(())
            })
            .await?;
        tracing::debug!(unique_id = %user.unique_id, role = %user.role, "user registered");
        Ok(())
    }

    /// Get a user by unique id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the user does not exist.
    pub async fn get_user(&self, unique_id: &str) -> Result<User, DatabaseError> {
        self.db()
            .read(|conn| async move {
                let mut rows = conn
                    .query(
                        "SELECT unique_id, card_uid, full_name, role FROM users WHERE unique_id = ?1",
                        [unique_id],
                    )
                    .await?;
                let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
                row_to_user(&row)
            })
            .await
    }

    /// Register a course.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::ConstraintViolation` if the code is taken.
    pub async fn register_course(&self, course: &Course) -> Result<(), DatabaseError> {
        self.db()
            .transaction(|conn| async move {
                conn.execute(
                    "INSERT INTO courses (code, title) VALUES (?1, ?2)",
                    libsql::params![course.code.as_str(), course.title.as_str()],
                )
                .await
                .map_err(DatabaseError::classify)?;
                Ok(())
            })
            .await
    }

    /// Make `lecturer_id` the single active lecturer of `course_code`.
    ///
    /// Any previously active lecturer stays assigned but becomes inactive.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the user does not exist,
    /// `DatabaseError::InvalidState` if the user is not a lecturer, or
    /// `DatabaseError::ConstraintViolation` if the course does not exist.
    pub async fn assign_lecturer(
        &self,
        course_code: &str,
        lecturer_id: &str,
    ) -> Result<(), DatabaseError> {
        self.db()
            .transaction(|conn| async move {
                require_role(&conn, lecturer_id, UserRole::Lecturer).await?;
                conn.execute(
                    "UPDATE course_lecturers SET active = 0 WHERE course_code = ?1 AND active = 1",
                    [course_code],
                )
                .await?;
                conn.execute(
                    "INSERT INTO course_lecturers (course_code, lecturer_id, active) VALUES (?1, ?2, 1)
                     ON CONFLICT (course_code, lecturer_id) DO UPDATE SET active = 1",
                    [course_code, lecturer_id],
                )
                .await
                .map_err(DatabaseError::classify)?;
                Ok(())
            })
            .await?;
        tracing::debug!(course_code, lecturer_id, "active lecturer assigned");
        Ok(())
    }

    /// Enroll a student in a course. Enrolling twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the user does not exist,
    /// `DatabaseError::InvalidState` if the user is not a student, or
    /// `DatabaseError::ConstraintViolation` if the course does not exist.
    pub async fn enroll_student(
        &self,
        course_code: &str,
        student_id: &str,
    ) -> Result<(), DatabaseError> {
        self.db()
            .transaction(|conn| async move {
                require_role(&conn, student_id, UserRole::Student).await?;
                conn.execute(
                    "INSERT OR IGNORE INTO course_enrollments (course_code, student_id) VALUES (?1, ?2)",
                    [course_code, student_id],
                )
                .await
                .map_err(DatabaseError::classify)?;
                Ok(())
            })
            .await
    }
}
