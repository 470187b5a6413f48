use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::LectureSessionDetail;

/// A single student's attended/absent fact, projected from an attendance record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CourseEligibilityFact {
    pub student_id: String,
    pub attended: bool,
}

/// Everything the eligibility subsystem needs from one committed session.
///
/// `session_id` keys the batch: applying the same batch again must not
/// count the lecture twice.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EligibilityBatch {
    pub session_id: i64,
    pub course_code: String,
    pub lecturer_id: String,
    pub facts: Vec<CourseEligibilityFact>,
}

impl From<&LectureSessionDetail> for EligibilityBatch {
    fn from(detail: &LectureSessionDetail) -> Self {
        Self {
            session_id: detail.session.id,
            course_code: detail.session.course_code.clone(),
            lecturer_id: detail.session.lecturer_id.clone(),
            facts: detail
                .records
                .iter()
                .map(|record| CourseEligibilityFact {
                    student_id: record.student_id.clone(),
                    attended: record.attended,
                })
                .collect(),
        }
    }
}

/// Computed attendance standing of one student in one course.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StudentEligibility {
    pub course_code: String,
    pub student_id: String,
    pub lectures_attended: i64,
    pub lectures_total: i64,
    /// Percentage of lectures attended, rounded to two decimals.
    pub eligibility: f64,
    pub eligible: bool,
}

/// Number of lectures a lecturer has delivered for a course.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LecturerAvailability {
    pub course_code: String,
    pub lecturer_id: String,
    pub lectures_delivered: i64,
}
