use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::PlanMode;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{EmployeeSummary, ShiftTypeCount, UnassignableWindowDto};

/// Record of one Orchestrator invocation, owned exclusively by the
/// Orchestrator from creation to outcome. Preview runs exist only in the
/// response returned to the caller; apply runs are persisted so `GET
/// /plan/{run_id}` can retrieve the committed outcome later.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlanningRun {
    pub id: Uuid,
    pub team_scope: String,
    pub horizon_start: DateTime<Utc>,
    pub horizon_end: DateTime<Utc>,
    pub initiator: String,
    pub requested_at: DateTime<Utc>,
    pub mode: PlanMode,
    pub committed: bool,
    pub outcome: PersistedOutcome,
}

/// The serialisable slice of a `PlanningOutcome` that gets persisted
/// alongside a committed `PlanningRun`. Kept separate from the live
/// `PlanningOutcome` (in `orchestrator`) so the wire/storage shape can
/// diverge from the in-run working types (`Vec<TentativeAssignment>`, the
/// per-run fairness cache) without coupling the two.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersistedOutcome {
    pub assignments: Vec<AssignmentDto>,
    pub unassignable: Vec<UnassignableWindowDto>,
    pub per_employee: Vec<EmployeeSummary>,
    pub per_shift_type: Vec<ShiftTypeCount>,
    pub system_score: f64,
    pub average_individual_score: f64,
}

/// One committed or previewed assignment, as returned in `assignments[]`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignmentDto {
    pub shift_type: shared::ShiftTypeKey,
    pub start_instant: DateTime<Utc>,
    pub end_instant: DateTime<Utc>,
    pub employee_id: Uuid,
    pub template_id: Uuid,
    pub auto_generated: bool,
}
