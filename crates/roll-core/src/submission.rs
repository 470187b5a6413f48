//! Inbound attendance-session payload and its shape validation.
//!
//! Edge devices post one submission per lecture: the session header plus an
//! ordered list of per-student marks. Validation is pure; nothing here
//! touches a store.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// One student's mark as captured by the edge device.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AttendanceEntry {
    pub student_id: String,
    pub attendance_time: DateTime<Utc>,
    pub attended: bool,
}

/// A lecture session together with the attendance marks taken during it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AttendanceSessionSubmission {
    pub session_id: i64,
    pub course_code: String,
    pub lecturer_id: String,
    pub session_date: DateTime<Utc>,
    #[serde(default)]
    pub attendance_data: Vec<AttendanceEntry>,
}

impl AttendanceSessionSubmission {
    /// Decode a submission from JSON.
    ///
    /// A missing or ill-typed field is a validation failure, not a decode
    /// error the caller has to special-case.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Malformed` when decoding fails.
    pub fn from_json(input: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(input).map_err(|e| ValidationError::Malformed(e.to_string()))
    }

    /// Check the submission's shape.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found: non-positive session id,
    /// empty course code, lecturer id or student id, or a student listed twice.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_id <= 0 {
            return Err(ValidationError::InvalidSessionId(self.session_id));
        }
        if self.course_code.trim().is_empty() {
            return Err(ValidationError::missing("course_code"));
        }
        if self.lecturer_id.trim().is_empty() {
            return Err(ValidationError::missing("lecturer_id"));
        }

        let mut seen = HashSet::with_capacity(self.attendance_data.len());
        for (idx, entry) in self.attendance_data.iter().enumerate() {
            if entry.student_id.trim().is_empty() {
                return Err(ValidationError::missing(format!(
                    "attendance_data[{idx}].student_id"
                )));
            }
            if !seen.insert(entry.student_id.as_str()) {
                return Err(ValidationError::DuplicateStudent {
                    student_id: entry.student_id.clone(),
                });
            }
        }
        Ok(())
    }
}
