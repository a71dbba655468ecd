use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{ShiftStatus, ShiftTypeKey};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::entities::Shift;

/// Shift serializer DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShiftSerializer {
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

impl From<Shift> for ShiftSerializer {
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
