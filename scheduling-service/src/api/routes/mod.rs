use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::api::state::AppState;
use crate::domain::entities::{AssignmentDto, EmployeeSummary, PersistedOutcome, PlanningRun, ShiftTypeCount, UnassignableWindowDto};
use crate::domain::orchestrator::{Metrics, PlanRequest, PlanningOutcome};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scheduling Service API",
        version = "1.0.0",
        description = "Shift orchestration engine: fairness-ranked shift assignment, preview and apply"
    ),
    paths(
        handlers::plan_handlers::plan,
        handlers::plan_handlers::get_plan,
    ),
    components(schemas(
        shared::ShiftTypeKey,
        shared::PlanMode,
        PlanRequest,
        PlanningOutcome,
        PlanningRun,
        PersistedOutcome,
        AssignmentDto,
        UnassignableWindowDto,
        EmployeeSummary,
        ShiftTypeCount,
        Metrics,
    )),
    tags(
        (name = "plan", description = "Planning run endpoints: preview, apply, and retrieval")
    )
)]
struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/plan", post(handlers::plan_handlers::plan))
        .route("/plan/:run_id", get(handlers::plan_handlers::get_plan));

    Router::new()
        .nest("/api/v1", api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
