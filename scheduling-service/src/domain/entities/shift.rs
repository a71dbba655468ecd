use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{ShiftStatus, ShiftTypeKey};
use utoipa::ToSchema;
use uuid::Uuid;

/// One assignment instance, persisted through the Repository Interface.
///
/// Invariant: `start_instant < end_instant`. If `status != Cancelled` and
/// `auto_generated`, the tuple `(assigned_employee, [start_instant,
/// end_instant))` must not overlap any other non-cancelled shift of the same
/// employee — enforced by the Constraint Checker during planning and
/// re-checked at apply time against the current repository state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Shift {
    pub id: Uuid,
    pub template_ref: Uuid,
    pub shift_type: ShiftTypeKey,
    pub assigned_employee: Uuid,
    pub start_instant: DateTime<Utc>,
    pub end_instant: DateTime<Utc>,
    pub status: ShiftStatus,
    pub auto_generated: bool,
}

impl Shift {
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_instant < end && start < self.end_instant
    }
}
