use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::{ApiResponse, DomainError, PaginationParams, ShiftTypeKey};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::requests::{CreateShiftTemplateRequest, UpdateShiftTemplateRequest};
use crate::api::state::AppState;
use crate::presentation::ShiftTemplateSerializer;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ShiftTypeQuery {
    pub shift_type: ShiftTypeKey,
}

#[utoipa::path(
    post,
    path = "/api/v1/templates",
    request_body = CreateShiftTemplateRequest,
    responses(
        (status = 201, description = "Template created successfully", body = ApiResponse<ShiftTemplateSerializer>),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    ),
    tag = "templates"
)]
pub async fn create_template(
    State(state): State<AppState>,
    Json(request): Json<CreateShiftTemplateRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let template = state
        .template_repo
        .create(request)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Template created successfully",
            ShiftTemplateSerializer::from(template),
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/templates/{id}",
    params(
        ("id" = Uuid, Path, description = "Template ID")
    ),
    responses(
        (status = 200, description = "Template found", body = ApiResponse<ShiftTemplateSerializer>),
        (status = 404, description = "Template not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "templates"
)]
pub async fn get_template_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let template = state
        .template_repo
        .find_by_id(id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((StatusCode::NOT_FOUND, "Template not found".to_string()))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Template retrieved successfully",
            ShiftTemplateSerializer::from(template),
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/templates",
    params(PaginationParams),
    responses(
        (status = 200, description = "Template list", body = ApiResponse<Vec<ShiftTemplateSerializer>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "templates"
)]
pub async fn list_templates(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let (templates, total) = state
        .template_repo
        .list(params)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let serialized: Vec<ShiftTemplateSerializer> = templates
        .into_iter()
        .map(ShiftTemplateSerializer::from)
        .collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_total(
            "Template list retrieved successfully",
            serialized,
            total,
        )),
    ))
}

/// Find templates registered for a shift type, most-used first. Used by the
/// scheduling engine to stamp default start/end times onto a generated Shift.
#[utoipa::path(
    get,
    path = "/api/v1/templates/by-type",
    params(ShiftTypeQuery),
    responses(
        (status = 200, description = "Templates for shift type", body = ApiResponse<Vec<ShiftTemplateSerializer>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "templates"
)]
pub async fn list_templates_by_type(
    State(state): State<AppState>,
    Query(query): Query<ShiftTypeQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let templates = state
        .template_repo
        .find_by_shift_type(query.shift_type)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let serialized: Vec<ShiftTemplateSerializer> = templates
        .into_iter()
        .map(ShiftTemplateSerializer::from)
        .collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Templates retrieved successfully",
            serialized,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/templates/{id}",
    params(
        ("id" = Uuid, Path, description = "Template ID")
    ),
    request_body = UpdateShiftTemplateRequest,
    responses(
        (status = 200, description = "Template updated successfully", body = ApiResponse<ShiftTemplateSerializer>),
        (status = 404, description = "Template not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "templates"
)]
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateShiftTemplateRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let template = state
        .template_repo
        .update(id, request)
        .await
        .map_err(|e| match e {
            DomainError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Template updated successfully",
            ShiftTemplateSerializer::from(template),
        )),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/templates/{id}",
    params(
        ("id" = Uuid, Path, description = "Template ID")
    ),
    responses(
        (status = 204, description = "Template deleted successfully"),
        (status = 404, description = "Template not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "templates"
)]
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state.template_repo.delete(id).await.map_err(|e| match e {
        DomainError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    })?;

    Ok(StatusCode::NO_CONTENT)
}
