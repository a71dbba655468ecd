use axum::{extract::Path, extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use shared::{cache_keys, cache_ttl, get_cached, set_cached, ApiResponse, DomainError, PlanMode};
use uuid::Uuid;

use crate::api::state::AppState;
use crate::domain::entities::{PersistedOutcome, PlanningRun};
use crate::domain::orchestrator::{PlanRequest, PlanningOutcome};

fn domain_error_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::InvalidInput(_) | DomainError::HorizonInvalid(_) | DomainError::NoEligibleEmployees(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DomainError::ConflictOnApply(_) => StatusCode::CONFLICT,
        DomainError::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        DomainError::RepositoryUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::DatabaseError(_) | DomainError::ExternalServiceError(_) | DomainError::InternalError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::InvariantViolation(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Run a planning request: decompose the horizon, rank candidates and
/// tentatively assign every window, then either return the preview or
/// commit it as the request's `mode` says.
#[utoipa::path(
    post,
    path = "/api/v1/plan",
    request_body = PlanRequest,
    responses(
        (status = 200, description = "Planning run completed", body = ApiResponse<PlanningOutcome>),
        (status = 409, description = "Apply-time re-check found a conflicting write"),
        (status = 422, description = "Horizon invalid, or no eligible employees under strict mode"),
        (status = 504, description = "Planning run exceeded its deadline"),
        (status = 503, description = "Repository Interface unavailable")
    ),
    tag = "plan"
)]
pub async fn plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mode = request.mode;

    let outcome = state
        .orchestrator
        .plan(request.clone(), None)
        .await
        .map_err(|e| (domain_error_status(&e), e.to_string()))?;

    if mode == PlanMode::Apply && outcome.committed {
        let run = PlanningRun {
            id: outcome.run_id,
            team_scope: request.team_scope.clone(),
            horizon_start: request.horizon_start,
            horizon_end: request.horizon_end,
            initiator: request.initiator.clone(),
            requested_at: Utc::now(),
            mode,
            committed: outcome.committed,
            outcome: PersistedOutcome {
                assignments: outcome.assignments.clone(),
                unassignable: outcome.unassignable.clone(),
                per_employee: outcome.metrics.per_employee.clone(),
                per_shift_type: outcome.per_shift_type.clone(),
                system_score: outcome.metrics.system_score,
                average_individual_score: outcome.metrics.average_individual_score,
            },
        };

        state
            .planning_run_store
            .save(&run)
            .await
            .map_err(|e| (domain_error_status(&e), e.to_string()))?;

        if let Some(redis_pool) = &state.redis_pool {
            let mut redis_conn = redis_pool.clone();
            set_cached(&mut redis_conn, &cache_keys::planning_run(run.id), &run, cache_ttl::PLANNING_RUN).await;
        }
    }

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Planning run completed", outcome)),
    ))
}

/// Retrieve a previously committed planning run by id.
#[utoipa::path(
    get,
    path = "/api/v1/plan/{run_id}",
    params(("run_id" = Uuid, Path, description = "Planning run id")),
    responses(
        (status = 200, description = "Planning run found", body = ApiResponse<PlanningRun>),
        (status = 404, description = "No committed planning run with that id")
    ),
    tag = "plan"
)]
pub async fn get_plan(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let cache_key = cache_keys::planning_run(run_id);

    if let Some(redis_pool) = &state.redis_pool {
        let mut redis_conn = redis_pool.clone();
        if let Some(cached) = get_cached::<crate::domain::entities::PlanningRun>(&mut redis_conn, &cache_key).await {
            return Ok((
                StatusCode::OK,
                Json(ApiResponse::success("Planning run retrieved from cache", cached)),
            ));
        }
    }

    let run = state
        .planning_run_store
        .find_by_id(run_id)
        .await
        .map_err(|e| (domain_error_status(&e), e.to_string()))?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                DomainError::NotFound(format!("planning run {run_id}")).to_string(),
            )
        })?;

    if let Some(redis_pool) = &state.redis_pool {
        let mut redis_conn = redis_pool.clone();
        set_cached(&mut redis_conn, &cache_key, &run, cache_ttl::PLANNING_RUN).await;
    }

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Planning run retrieved", run)),
    ))
}

