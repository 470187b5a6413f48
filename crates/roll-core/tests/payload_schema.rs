//! JSON Schema checks for the payloads exchanged with edge devices.

use chrono::Utc;
use schemars::schema_for;
use serde_json::json;

use roll_core::snapshot::{AttendanceSnapshot, ParticipantIdentity};
use roll_core::submission::{AttendanceEntry, AttendanceSessionSubmission};

fn schema_errors(schema: &serde_json::Value, instance: &serde_json::Value) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

#[test]
fn submission_schema_accepts_edge_payload() {
    let schema = serde_json::to_value(schema_for!(AttendanceSessionSubmission)).unwrap();
    let payload = json!({
        "session_id": 4821,
        "course_code": "CS101",
        "lecturer_id": "L1",
        "session_date": "2026-03-02T09:00:00Z",
        "attendance_data": [
            {"student_id": "S1", "attendance_time": "2026-03-02T09:04:11Z", "attended": true},
            {"student_id": "S2", "attendance_time": "2026-03-02T09:04:11Z", "attended": false}
        ]
    });

    let errors = schema_errors(&schema, &payload);
    assert!(errors.is_empty(), "unexpected schema errors: {errors:?}");
}

#[test]
fn submission_schema_rejects_missing_attended_flag() {
    let schema = serde_json::to_value(schema_for!(AttendanceSessionSubmission)).unwrap();
    let payload = json!({
        "session_id": 4821,
        "course_code": "CS101",
        "lecturer_id": "L1",
        "session_date": "2026-03-02T09:00:00Z",
        "attendance_data": [{"student_id": "S1", "attendance_time": "2026-03-02T09:04:11Z"}]
    });

    assert!(!schema_errors(&schema, &payload).is_empty());
}

#[test]
fn serialized_submission_matches_its_schema() {
    let submission = AttendanceSessionSubmission {
        session_id: 1,
        course_code: "CS101".into(),
        lecturer_id: "L1".into(),
        session_date: Utc::now(),
        attendance_data: vec![AttendanceEntry {
            student_id: "S1".into(),
            attendance_time: Utc::now(),
            attended: true,
        }],
    };
    let schema = serde_json::to_value(schema_for!(AttendanceSessionSubmission)).unwrap();
    let instance = serde_json::to_value(&submission).unwrap();

    assert!(schema_errors(&schema, &instance).is_empty());
}

#[test]
fn snapshot_schema_accepts_course_without_lecturer() {
    let schema = serde_json::to_value(schema_for!(AttendanceSnapshot)).unwrap();
    let with_lecturer = AttendanceSnapshot::for_course(
        "CS101",
        Some(ParticipantIdentity {
            card_uid: "A1B2C3D4".into(),
            name: "Ada Lovelace".into(),
            unique_id: "L1".into(),
        }),
        Vec::new(),
    );
    let without_lecturer = AttendanceSnapshot::for_course("CS102", None, Vec::new());

    for snapshot in [with_lecturer, without_lecturer] {
        let instance = serde_json::to_value(&snapshot).unwrap();
        let errors = schema_errors(&schema, &instance);
        assert!(errors.is_empty(), "unexpected schema errors: {errors:?}");
    }
}
