use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared::{ApiResponse, DomainError, ShiftTypeKey};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::requests::ApplyShiftsRequest;
use crate::api::state::AppState;
use crate::presentation::ShiftSerializer;

fn parse_employee_ids(csv: &str) -> Vec<Uuid> {
    csv.split(',').filter(|s| !s.is_empty()).filter_map(|s| s.parse().ok()).collect()
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ShiftRangeQuery {
    /// Comma-separated employee ids
    pub employee_ids: String,
    pub range_start: DateTime<Utc>,
    pub range_end: DateTime<Utc>,
    #[serde(default)]
    pub include_cancelled: bool,
}

/// List shifts of a set of employees overlapping a range. This is the
/// endpoint the scheduling engine's Repository Interface calls for
/// `list_shifts`.
#[utoipa::path(
    get,
    path = "/api/v1/shifts",
    params(ShiftRangeQuery),
    responses(
        (status = 200, description = "Shifts overlapping the range", body = ApiResponse<Vec<ShiftSerializer>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "shifts"
)]
pub async fn list_shifts(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<ShiftRangeQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let employee_ids = parse_employee_ids(&query.employee_ids);

    let shifts = state
        .shift_repo
        .list_in_range(&employee_ids, query.range_start, query.range_end, query.include_cancelled)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let serialized: Vec<ShiftSerializer> = shifts.into_iter().map(ShiftSerializer::from).collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Shifts retrieved successfully", serialized)),
    ))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct HistoryCountQuery {
    /// Comma-separated employee ids
    pub employee_ids: String,
    pub shift_type: ShiftTypeKey,
    pub since: DateTime<Utc>,
}

/// Raw (unweighted) per-employee assignment count for a shift type since a
/// point in time. This is the endpoint the scheduling engine's Repository
/// Interface calls for `history_counts`, after applying its own fairness
/// weight to the raw count returned here.
#[utoipa::path(
    get,
    path = "/api/v1/shifts/history-counts",
    params(HistoryCountQuery),
    responses(
        (status = 200, description = "Raw per-employee assignment counts", body = ApiResponse<std::collections::HashMap<Uuid, i64>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "shifts"
)]
pub async fn history_counts(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<HistoryCountQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let employee_ids = parse_employee_ids(&query.employee_ids);

    let counts = state
        .shift_repo
        .history_raw_counts(&employee_ids, query.shift_type, query.since)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("History counts retrieved successfully", counts)),
    ))
}

/// Atomically write a batch of shifts produced by an Apply-mode planning
/// run. Acquires an advisory lock scoped to the request's team and horizon,
/// re-checks every shift against current state, and commits all-or-nothing.
#[utoipa::path(
    post,
    path = "/api/v1/shifts/apply",
    request_body = ApplyShiftsRequest,
    responses(
        (status = 201, description = "Shifts written successfully", body = ApiResponse<Vec<ShiftSerializer>>),
        (status = 409, description = "A shift in the batch conflicts with current state"),
        (status = 500, description = "Internal server error")
    ),
    tag = "shifts"
)]
pub async fn apply_shifts(
    State(state): State<AppState>,
    Json(request): Json<ApplyShiftsRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let shifts = state.shift_repo.apply(request).await.map_err(|e| match e {
        DomainError::ConflictOnApply(msg) => (StatusCode::CONFLICT, msg),
        other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    })?;

    let serialized: Vec<ShiftSerializer> = shifts.into_iter().map(ShiftSerializer::from).collect();

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Shifts applied successfully", serialized)),
    ))
}
