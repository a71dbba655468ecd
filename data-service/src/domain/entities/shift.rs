use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{ShiftStatus, ShiftTypeKey};
use utoipa::ToSchema;
use uuid::Uuid;

/// One committed or tentative assignment instance. Unlike `Employee`,
/// `ShiftTemplate` and `LeaveRecord`, this type has no counterpart in
/// `shared` — the scheduling engine works with its own in-process `Shift`
/// during a planning run and only talks to this table through the wire
/// shape below, which mirrors it field-for-field.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Shift {
    pub id: Uuid,
    pub template_ref: Uuid,
    pub shift_type: ShiftTypeKey,
    pub assigned_employee: Uuid,
    pub start_instant: DateTime<Utc>,
    pub end_instant: DateTime<Utc>,
    pub status: ShiftStatus,
    pub auto_generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shift response DTO.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShiftResponse {
    pub id: Uuid,
    pub template_ref: Uuid,
    pub shift_type: ShiftTypeKey,
    pub assigned_employee: Uuid,
    pub start_instant: DateTime<Utc>,
    pub end_instant: DateTime<Utc>,
    pub status: ShiftStatus,
    pub auto_generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Shift> for ShiftResponse {
    fn from(shift: Shift) -> Self {
        Self {
            id: shift.id,
            template_ref: shift.template_ref,
            shift_type: shift.shift_type,
            assigned_employee: shift.assigned_employee,
            start_instant: shift.start_instant,
            end_instant: shift.end_instant,
            status: shift.status,
            auto_generated: shift.auto_generated,
            created_at: shift.created_at,
            updated_at: shift.updated_at,
        }
    }
}
