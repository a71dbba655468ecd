use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{ApiResponse, DomainError, PaginationParams};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::requests::{CreateLeaveRecordRequest, UpdateLeaveStatusRequest};
use crate::api::state::AppState;
use crate::presentation::LeaveRecordSerializer;

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmployeePagination {
    pub employee_id: Uuid,
    #[serde(flatten)]
    #[into_params(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct OverlapQuery {
    /// Comma-separated employee ids
    pub employee_ids: String,
    pub range_start: NaiveDate,
    pub range_end_exclusive: NaiveDate,
}

#[utoipa::path(
    post,
    path = "/api/v1/leave-records",
    request_body = CreateLeaveRecordRequest,
    responses(
        (status = 201, description = "Leave record created successfully", body = ApiResponse<LeaveRecordSerializer>),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    ),
    tag = "leave-records"
)]
pub async fn create_leave_record(
    State(state): State<AppState>,
    Json(request): Json<CreateLeaveRecordRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let record = state
        .leave_repo
        .create(request)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Leave record created successfully",
            LeaveRecordSerializer::from(record),
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/leave-records/{id}",
    params(
        ("id" = Uuid, Path, description = "Leave record ID")
    ),
    responses(
        (status = 200, description = "Leave record found", body = ApiResponse<LeaveRecordSerializer>),
        (status = 404, description = "Leave record not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "leave-records"
)]
pub async fn get_leave_record_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let record = state
        .leave_repo
        .find_by_id(id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((StatusCode::NOT_FOUND, "Leave record not found".to_string()))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Leave record retrieved successfully",
            LeaveRecordSerializer::from(record),
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/leave-records",
    params(EmployeePagination),
    responses(
        (status = 200, description = "Leave record list", body = ApiResponse<Vec<LeaveRecordSerializer>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "leave-records"
)]
pub async fn list_leave_records(
    State(state): State<AppState>,
    Query(query): Query<EmployeePagination>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let (records, total) = state
        .leave_repo
        .list_by_employee(query.employee_id, query.pagination)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let serialized: Vec<LeaveRecordSerializer> =
        records.into_iter().map(LeaveRecordSerializer::from).collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_total(
            "Leave record list retrieved successfully",
            serialized,
            total,
        )),
    ))
}

/// List `Approved` leave records overlapping a date range for a batch of
/// employees. This is the endpoint the scheduling engine's Repository
/// Interface calls for `list_approved_leaves`.
#[utoipa::path(
    get,
    path = "/api/v1/leave-records/approved-overlapping",
    params(OverlapQuery),
    responses(
        (status = 200, description = "Overlapping approved leave records", body = ApiResponse<Vec<LeaveRecordSerializer>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "leave-records"
)]
pub async fn list_approved_overlapping(
    State(state): State<AppState>,
    Query(query): Query<OverlapQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let employee_ids: Vec<Uuid> = query
        .employee_ids
        .split(',')
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect();

    let records = state
        .leave_repo
        .list_approved_overlapping(&employee_ids, query.range_start, query.range_end_exclusive)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let serialized: Vec<LeaveRecordSerializer> =
        records.into_iter().map(LeaveRecordSerializer::from).collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Overlapping leave records retrieved successfully",
            serialized,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/leave-records/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Leave record ID")
    ),
    request_body = UpdateLeaveStatusRequest,
    responses(
        (status = 200, description = "Leave record status updated", body = ApiResponse<LeaveRecordSerializer>),
        (status = 404, description = "Leave record not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "leave-records"
)]
pub async fn update_leave_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLeaveStatusRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let record = state
        .leave_repo
        .update_status(id, request)
        .await
        .map_err(|e| match e {
            DomainError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Leave record status updated successfully",
            LeaveRecordSerializer::from(record),
        )),
    ))
}
