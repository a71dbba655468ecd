use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::ShiftTypeKey;
use utoipa::ToSchema;
use uuid::Uuid;

/// Per-employee slice of the `metrics.per_employee` response map: assigned
/// days, projected load, and the fairness score that drove the ranking at
/// the moment this employee was (or would have been) selected.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeSummary {
    pub employee_id: Uuid,
    pub assigned_days: f64,
    pub projected_load: f64,
    pub individual_score: f64,
}

/// Per-shift-type assignment count for the `metrics` / summary payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShiftTypeCount {
    pub shift_type: ShiftTypeKey,
    pub count: u32,
}

/// A window for which no candidate passed the Constraint Checker.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UnassignableWindowDto {
    pub shift_type: ShiftTypeKey,
    pub start_instant: DateTime<Utc>,
    pub end_instant: DateTime<Utc>,
    pub reason: String,
}
