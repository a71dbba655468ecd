use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::{cache_keys, cache_ttl, get_cached, invalidate_cache, set_cached, ApiResponse, DomainError, PaginationParams};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::requests::{CreateEmployeeRequest, UpdateEmployeeRequest};
use crate::api::state::AppState;
use crate::presentation::EmployeeSerializer;

#[derive(Debug, Deserialize, IntoParams)]
pub struct TeamScopeQuery {
    pub team_scope: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TeamScopedPagination {
    pub team_scope: String,
    #[serde(flatten)]
    #[into_params(flatten)]
    pub pagination: PaginationParams,
}

#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created successfully", body = ApiResponse<EmployeeSerializer>),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    ),
    tag = "employees"
)]
pub async fn create_employee(
    State(state): State<AppState>,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let team_scope = request.team_scope.clone();

    let employee = state
        .employee_repo
        .create(request)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let mut redis_conn = state.redis_pool.clone();
    invalidate_cache(&mut redis_conn, &cache_keys::team_employees(&team_scope)).await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Employee created successfully",
            EmployeeSerializer::from(employee),
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(
        ("id" = Uuid, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = ApiResponse<EmployeeSerializer>),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "employees"
)]
pub async fn get_employee_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let employee = state
        .employee_repo
        .find_by_id(id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((StatusCode::NOT_FOUND, "Employee not found".to_string()))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Employee retrieved successfully",
            EmployeeSerializer::from(employee),
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(TeamScopedPagination),
    responses(
        (status = 200, description = "Employee list", body = ApiResponse<Vec<EmployeeSerializer>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "employees"
)]
pub async fn list_employees(
    State(state): State<AppState>,
    Query(query): Query<TeamScopedPagination>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let (employees, total) = state
        .employee_repo
        .list_by_team(&query.team_scope, query.pagination)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let serialized: Vec<EmployeeSerializer> =
        employees.into_iter().map(EmployeeSerializer::from).collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_total(
            "Employee list retrieved successfully",
            serialized,
            total,
        )),
    ))
}

/// List every active employee in a team, unpaginated. This is the endpoint
/// the scheduling engine's Repository Interface calls for `list_employees`;
/// results are cached since the Orchestrator re-reads this set for every
/// window of a planning run.
#[utoipa::path(
    get,
    path = "/api/v1/employees/active",
    params(TeamScopeQuery),
    responses(
        (status = 200, description = "Active employees in team", body = ApiResponse<Vec<EmployeeSerializer>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "employees"
)]
pub async fn list_active_employees(
    State(state): State<AppState>,
    Query(query): Query<TeamScopeQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let cache_key = cache_keys::team_employees(&query.team_scope);
    let mut redis_conn = state.redis_pool.clone();

    if let Some(cached) = get_cached::<Vec<EmployeeSerializer>>(&mut redis_conn, &cache_key).await {
        return Ok((
            StatusCode::OK,
            Json(ApiResponse::success("Active employees retrieved from cache", cached)),
        ));
    }

    let employees = state
        .employee_repo
        .list_active_by_team(&query.team_scope)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let serialized: Vec<EmployeeSerializer> =
        employees.into_iter().map(EmployeeSerializer::from).collect();

    set_cached(&mut redis_conn, &cache_key, &serialized, cache_ttl::TEAM_EMPLOYEES).await;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Active employees retrieved successfully",
            serialized,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(
        ("id" = Uuid, Path, description = "Employee ID")
    ),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated successfully", body = ApiResponse<EmployeeSerializer>),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "employees"
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let employee = state
        .employee_repo
        .update(id, request)
        .await
        .map_err(|e| match e {
            DomainError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;

    let mut redis_conn = state.redis_pool.clone();
    invalidate_cache(&mut redis_conn, &cache_keys::team_employees(&employee.team_scope)).await;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Employee updated successfully",
            EmployeeSerializer::from(employee),
        )),
    ))
}
