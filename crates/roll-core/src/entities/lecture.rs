use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One lecture's attendance-taking event. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LectureSession {
    pub id: i64,
    pub course_code: String,
    pub lecturer_id: String,
    pub session_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// One student's presence or absence in a lecture session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub session_id: i64,
    pub student_id: String,
    pub attendance_time: DateTime<Utc>,
    pub attended: bool,
}

/// A session header together with all of its attendance rows.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LectureSessionDetail {
    pub session: LectureSession,
    pub records: Vec<AttendanceRecord>,
}
