use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared::{ShiftStatus, ShiftTypeKey};
use utoipa::ToSchema;
use uuid::Uuid;

/// One shift to write as part of an apply batch. `id` is supplied by the
/// caller (the Orchestrator mints it) so that a retried apply call is
/// idempotent against the same planning run.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewShiftInput {
    pub id: Uuid,
    pub template_ref: Uuid,
    pub shift_type: ShiftTypeKey,
    pub assigned_employee: Uuid,
    pub start_instant: DateTime<Utc>,
    pub end_instant: DateTime<Utc>,
    #[serde(default = "default_status")]
    pub status: ShiftStatus,
    #[serde(default = "default_auto_generated")]
    pub auto_generated: bool,
}

fn default_status() -> ShiftStatus {
    ShiftStatus::Scheduled
}

fn default_auto_generated() -> bool {
    true
}

/// Request body for the atomic apply endpoint. `team_scope` and the horizon
/// bound the advisory lock scope so two concurrent apply calls for disjoint
/// teams or horizons never contend.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ApplyShiftsRequest {
    pub team_scope: String,
    pub horizon_start: DateTime<Utc>,
    pub horizon_end: DateTime<Utc>,
    pub shifts: Vec<NewShiftInput>,
}
