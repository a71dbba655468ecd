pub mod employee_handlers;
pub mod leave_record_handlers;
pub mod shift_handlers;
pub mod shift_template_handlers;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Health check handler
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
