//! Shift template API integration tests

#[path = "common/mod.rs"]
mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
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

#[tokio::test]
async fn test_create_template_success() {
    let server = setup_test_server().await;

    let request_body = json!({
        "shift_type": "INCIDENTS",
        "default_start_time": "08:00:00",
        "default_end_time": "17:00:00",
        "tags": ["weekday"]
    });

    let response = server.post("/api/v1/templates").json(&request_body).await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["shift_type"], "INCIDENTS");
    assert_eq!(body["data"]["usage_count"], 0);
}

#[tokio::test]
async fn test_list_templates_by_type_orders_by_usage() {
    let server = setup_test_server().await;

    for _ in 0..2 {
        server
            .post("/api/v1/templates")
            .json(&json!({
                "shift_type": "WAAKDIENST",
                "default_start_time": "17:00:00",
                "default_end_time": "08:00:00",
            }))
            .await;
    }

    let response = server
        .get("/api/v1/templates/by-type?shift_type=WAAKDIENST")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
}

#[tokio::test]
async fn test_delete_template_not_found() {
    let server = setup_test_server().await;

    let response = server
        .delete(&format!("/api/v1/templates/{}", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
