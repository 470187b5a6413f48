//! Attendance service wired to the real eligibility ledger.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;

use roll_core::entities::{Course, User};
use roll_core::enums::UserRole;
use roll_db::AttendanceStore;
use roll_eligibility::EligibilityLedger;
use roll_service::AttendanceService;

async fn wired_service() -> AttendanceService<Arc<EligibilityLedger>> {
    let store = AttendanceStore::open_local(":memory:").await.unwrap();
    store
        .register_course(&Course {
            code: "CS101".into(),
            title: "Introduction to Computing".into(),
        })
        .await
        .unwrap();
    for (id, role) in [
        ("L1", UserRole::Lecturer),
        ("S1", UserRole::Student),
        ("S2", UserRole::Student),
    ] {
        store
            .register_user(&User {
                unique_id: id.into(),
                card_uid: format!("CARD-{id}"),
                full_name: format!("User {id}"),
                role,
            })
            .await
            .unwrap();
    }
    store.assign_lecturer("CS101", "L1").await.unwrap();
    store.enroll_student("CS101", "S1").await.unwrap();
    store.enroll_student("CS101", "S2").await.unwrap();

    let ledger = EligibilityLedger::open_local(":memory:", 75.0).await.unwrap();
    AttendanceService::new(store, Arc::new(ledger), Duration::from_secs(5))
}

fn payload(session_id: i64, s1: bool, s2: bool) -> String {
    json!({
        "session_id": session_id,
        "course_code": "CS101",
        "lecturer_id": "L1",
        "session_date": "2026-03-02T09:00:00Z",
        "attendance_data": [
            {"student_id": "S1", "attendance_time": "2026-03-02T09:01:00Z", "attended": s1},
            {"student_id": "S2", "attendance_time": "2026-03-02T09:02:00Z", "attended": s2}
        ]
    })
    .to_string()
}

#[tokio::test]
async fn submissions_drive_eligibility() {
    let service = wired_service().await;
    service.submit_json(&payload(1, true, false)).await.unwrap();
    service.submit_json(&payload(2, true, true)).await.unwrap();

    let standings = service
        .propagator()
        .course_eligibility("CS101")
        .await
        .unwrap();
    let summary: Vec<(&str, i64, i64, bool)> = standings
        .iter()
        .map(|s| {
            (
                s.student_id.as_str(),
                s.lectures_attended,
                s.lectures_total,
                s.eligible,
            )
        })
        .collect();
    assert_eq!(summary, vec![("S1", 2, 2, true), ("S2", 1, 2, false)]);

    let availability = service
        .propagator()
        .lecturer_availability("CS101", "L1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(availability.lectures_delivered, 2);
}

#[tokio::test]
async fn retrying_an_applied_session_changes_nothing() {
    let service = wired_service().await;
    service.submit_json(&payload(1, true, false)).await.unwrap();
    let before = service
        .propagator()
        .course_eligibility("CS101")
        .await
        .unwrap();

    service.retry_propagation(1).await.unwrap();
    service.retry_propagation(1).await.unwrap();

    let after = service
        .propagator()
        .course_eligibility("CS101")
        .await
        .unwrap();
    assert_eq!(before, after);
}
