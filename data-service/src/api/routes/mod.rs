use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{handlers, state::AppState};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Data Service API",
        version = "1.0.0",
        description = "Employee, shift template and leave record management API with Redis caching"
    ),
    paths(
        // Employee endpoints
        handlers::employee_handlers::create_employee,
        handlers::employee_handlers::get_employee_by_id,
        handlers::employee_handlers::list_employees,
        handlers::employee_handlers::list_active_employees,
        handlers::employee_handlers::update_employee,
        // Shift template endpoints
        handlers::shift_template_handlers::create_template,
        handlers::shift_template_handlers::get_template_by_id,
        handlers::shift_template_handlers::list_templates,
        handlers::shift_template_handlers::list_templates_by_type,
        handlers::shift_template_handlers::update_template,
        handlers::shift_template_handlers::delete_template,
        // Leave record endpoints
        handlers::leave_record_handlers::create_leave_record,
        handlers::leave_record_handlers::get_leave_record_by_id,
        handlers::leave_record_handlers::list_leave_records,
        handlers::leave_record_handlers::list_approved_overlapping,
        handlers::leave_record_handlers::update_leave_status,
        // Shift endpoints
        handlers::shift_handlers::list_shifts,
        handlers::shift_handlers::history_counts,
        handlers::shift_handlers::apply_shifts,
    ),
    components(schemas(
        // Shared types
        shared::ShiftTypeKey,
        shared::ShiftStatus,
        shared::LeaveStatus,
        shared::PaginationParams,
        shared::PaginatedResponse<crate::presentation::EmployeeSerializer>,
        shared::PaginatedResponse<crate::presentation::ShiftTemplateSerializer>,
        shared::PaginatedResponse<crate::presentation::LeaveRecordSerializer>,
        // Employee schemas
        crate::domain::entities::EmployeeResponse,
        crate::presentation::EmployeeSerializer,
        crate::api::requests::CreateEmployeeRequest,
        crate::api::requests::UpdateEmployeeRequest,
        // Shift template schemas
        crate::domain::entities::ShiftTemplateResponse,
        crate::presentation::ShiftTemplateSerializer,
        crate::api::requests::CreateShiftTemplateRequest,
        crate::api::requests::UpdateShiftTemplateRequest,
        // Leave record schemas
        crate::domain::entities::LeaveRecordResponse,
        crate::presentation::LeaveRecordSerializer,
        crate::api::requests::CreateLeaveRecordRequest,
        crate::api::requests::UpdateLeaveStatusRequest,
        // Shift schemas
        crate::domain::entities::ShiftResponse,
        crate::presentation::ShiftSerializer,
        crate::api::requests::ApplyShiftsRequest,
        crate::api::requests::NewShiftInput,
    )),
    tags(
        (name = "employees", description = "Employee management endpoints"),
        (name = "templates", description = "Shift template management endpoints"),
        (name = "leave-records", description = "Leave record management endpoints"),
        (name = "shifts", description = "Shift persistence endpoints consumed by the scheduling engine")
    )
)]
struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    let employee_routes = Router::new()
        .route(
            "/employees",
            post(handlers::employee_handlers::create_employee),
        )
        .route(
            "/employees",
            get(handlers::employee_handlers::list_employees),
        )
        .route(
            "/employees/active",
            get(handlers::employee_handlers::list_active_employees),
        )
        .route(
            "/employees/:id",
            get(handlers::employee_handlers::get_employee_by_id),
        )
        .route(
            "/employees/:id",
            put(handlers::employee_handlers::update_employee),
        );

    let template_routes = Router::new()
        .route(
            "/templates",
            post(handlers::shift_template_handlers::create_template),
        )
        .route(
            "/templates",
            get(handlers::shift_template_handlers::list_templates),
        )
        .route(
            "/templates/by-type",
            get(handlers::shift_template_handlers::list_templates_by_type),
        )
        .route(
            "/templates/:id",
            get(handlers::shift_template_handlers::get_template_by_id),
        )
        .route(
            "/templates/:id",
            put(handlers::shift_template_handlers::update_template),
        )
        .route(
            "/templates/:id",
            delete(handlers::shift_template_handlers::delete_template),
        );

    let leave_routes = Router::new()
        .route(
            "/leave-records",
            post(handlers::leave_record_handlers::create_leave_record),
        )
        .route(
            "/leave-records",
            get(handlers::leave_record_handlers::list_leave_records),
        )
        .route(
            "/leave-records/approved-overlapping",
            get(handlers::leave_record_handlers::list_approved_overlapping),
        )
        .route(
            "/leave-records/:id",
            get(handlers::leave_record_handlers::get_leave_record_by_id),
        )
        .route(
            "/leave-records/:id/status",
            put(handlers::leave_record_handlers::update_leave_status),
        );

    let shift_routes = Router::new()
        .route("/shifts", get(handlers::shift_handlers::list_shifts))
        .route(
            "/shifts/history-counts",
            get(handlers::shift_handlers::history_counts),
        )
        .route("/shifts/apply", post(handlers::shift_handlers::apply_shifts));

    let api_router = Router::new()
        .route("/health", get(handlers::health_check))
        .merge(employee_routes)
        .merge(template_routes)
        .merge(leave_routes)
        .merge(shift_routes);

    Router::new()
        .nest("/api/v1", api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
