//! Shift API integration tests

#[path = "common/mod.rs"]
mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use common::{
    create_mock_redis_pool, create_test_app_state, MockEmployeeRepository, MockLeaveRecordRepository,
    MockShiftRepository, MockShiftTemplateRepository,
};
use data_service::api::create_router;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

async fn setup_test_server() -> TestServer {
    let employee_repo = Arc::new(MockEmployeeRepository::new());
    let template_repo = Arc::new(MockShiftTemplateRepository::new());
    let leave_repo = Arc::new(MockLeaveRecordRepository::new());
    let shift_repo = Arc::new(MockShiftRepository::new());
    let redis_pool = create_mock_redis_pool().await;

    let state = create_test_app_state(employee_repo, template_repo, leave_repo, shift_repo, redis_pool);
    TestServer::new(create_router(state)).unwrap()
}

fn sample_shift_payload(employee_id: Uuid, start: chrono::DateTime<Utc>, end: chrono::DateTime<Utc>) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "template_ref": Uuid::new_v4(),
        "shift_type": "INCIDENTS",
        "assigned_employee": employee_id,
        "start_instant": start,
        "end_instant": end,
        "status": "SCHEDULED",
        "auto_generated": true
    })
}

#[tokio::test]
async fn test_apply_shifts_success() {
    let server = setup_test_server().await;
    let employee_id = Uuid::new_v4();
    let start = Utc::now();
    let end = start + Duration::hours(9);

    let response = server
        .post("/api/v1/shifts/apply")
        .json(&json!({
            "team_scope": "T1",
            "horizon_start": start,
            "horizon_end": end,
            "shifts": [sample_shift_payload(employee_id, start, end)]
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["assigned_employee"], employee_id.to_string());
}

#[tokio::test]
async fn test_apply_shifts_conflict_on_overlap() {
    let server = setup_test_server().await;
    let employee_id = Uuid::new_v4();
    let start = Utc::now();
    let end = start + Duration::hours(9);

    let first = server
        .post("/api/v1/shifts/apply")
        .json(&json!({
            "team_scope": "T1",
            "horizon_start": start,
            "horizon_end": end,
            "shifts": [sample_shift_payload(employee_id, start, end)]
        }))
        .await;
    first.assert_status(StatusCode::CREATED);

    let overlapping_start = start + Duration::hours(1);
    let overlapping_end = overlapping_start + Duration::hours(9);
    let second = server
        .post("/api/v1/shifts/apply")
        .json(&json!({
            "team_scope": "T1",
            "horizon_start": overlapping_start,
            "horizon_end": overlapping_end,
            "shifts": [sample_shift_payload(employee_id, overlapping_start, overlapping_end)]
        }))
        .await;

    second.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_shifts_filters_by_range_and_employee() {
    let server = setup_test_server().await;
    let employee_id = Uuid::new_v4();
    let other_employee = Uuid::new_v4();
    let start = Utc::now();
    let end = start + Duration::hours(9);

    server
        .post("/api/v1/shifts/apply")
        .json(&json!({
            "team_scope": "T1",
            "horizon_start": start,
            "horizon_end": end,
            "shifts": [
                sample_shift_payload(employee_id, start, end),
                sample_shift_payload(other_employee, start, end)
            ]
        }))
        .await;

    let response = server
        .get(&format!(
            "/api/v1/shifts?employee_ids={}&range_start={}&range_end={}",
            employee_id,
            (start - Duration::days(1)).to_rfc3339(),
            (end + Duration::days(1)).to_rfc3339()
        ))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["assigned_employee"], employee_id.to_string());
}

#[tokio::test]
async fn test_history_counts_only_counts_matching_shift_type_since() {
    let server = setup_test_server().await;
    let employee_id = Uuid::new_v4();
    let start = Utc::now() - Duration::days(10);
    let end = start + Duration::hours(9);

    server
        .post("/api/v1/shifts/apply")
        .json(&json!({
            "team_scope": "T1",
            "horizon_start": start,
            "horizon_end": end,
            "shifts": [sample_shift_payload(employee_id, start, end)]
        }))
        .await;

    let since_before = Utc::now() - Duration::days(30);
    let response = server
        .get(&format!(
            "/api/v1/shifts/history-counts?employee_ids={}&shift_type=INCIDENTS&since={}",
            employee_id,
            since_before.to_rfc3339()
        ))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"][employee_id.to_string()], 1);

    let since_after = Utc::now();
    let response = server
        .get(&format!(
            "/api/v1/shifts/history-counts?employee_ids={}&shift_type=INCIDENTS&since={}",
            employee_id,
            since_after.to_rfc3339()
        ))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["data"].get(&employee_id.to_string()).is_none());
}
