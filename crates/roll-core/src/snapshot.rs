//! Read-side attendance snapshot served to edge devices.
//!
//! Edge devices fetch this before a lecture to learn which identity cards
//! belong to the course's active lecturer and enrolled students. The JSON
//! shape is fixed by the devices:
//!
//! ```json
//! {"data": {"CS101": {"lecturer_data": {"uid": "..", "name": "..", "unique_id": ".."},
//!                     "students": [{"uid": "..", "name": "..", "unique_id": ".."}]}}}
//! ```
//!
//! `lecturer_data` is omitted when the course has no active lecturer.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity card, display name, and school ID of one participant.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ParticipantIdentity {
    #[serde(rename = "uid")]
    pub card_uid: String,
    pub name: String,
    pub unique_id: String,
}

/// Lecturer and roster of a single course.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CourseAttendanceData {
    #[serde(
        rename = "lecturer_data",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub lecturer: Option<ParticipantIdentity>,
    #[serde(default)]
    pub students: Vec<ParticipantIdentity>,
}

impl CourseAttendanceData {
    /// True when neither a lecturer nor any student was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lecturer.is_none() && self.students.is_empty()
    }
}

/// Point-in-time projection of lecturer and roster data, keyed by course code.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AttendanceSnapshot {
    pub data: BTreeMap<String, CourseAttendanceData>,
}

impl AttendanceSnapshot {
    /// Build a snapshot holding a single course.
    #[must_use]
    pub fn for_course(
        course_code: impl Into<String>,
        lecturer: Option<ParticipantIdentity>,
        students: Vec<ParticipantIdentity>,
    ) -> Self {
        let mut data = BTreeMap::new();
        data.insert(course_code.into(), CourseAttendanceData { lecturer, students });
        Self { data }
    }

    #[must_use]
    pub fn course(&self, course_code: &str) -> Option<&CourseAttendanceData> {
        self.data.get(course_code)
    }

    /// True when every course in the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.values().all(CourseAttendanceData::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_in_edge_device_shape() {
        let snapshot = AttendanceSnapshot::for_course(
            "CS101",
            Some(ParticipantIdentity {
                card_uid: "A1B2C3D4".into(),
                name: "Ada Lovelace".into(),
                unique_id: "L1".into(),
            }),
            vec![ParticipantIdentity {
                card_uid: "11223344".into(),
                name: "Sam Student".into(),
                unique_id: "S1".into(),
            }],
        );

        assert_eq!(
            serde_json::to_value(&snapshot).unwrap(),
            json!({
                "data": {
                    "CS101": {
                        "lecturer_data": {"uid": "A1B2C3D4", "name": "Ada Lovelace", "unique_id": "L1"},
                        "students": [{"uid": "11223344", "name": "Sam Student", "unique_id": "S1"}]
                    }
                }
            })
        );
    }

    #[test]
    fn missing_lecturer_is_omitted_and_empty() {
        let snapshot = AttendanceSnapshot::for_course("CS404", None, Vec::new());
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value, json!({"data": {"CS404": {"students": []}}}));
        assert!(snapshot.is_empty());
        assert!(snapshot.course("CS404").unwrap().is_empty());
    }
}
