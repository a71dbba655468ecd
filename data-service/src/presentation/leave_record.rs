use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::{LeaveRecord, LeaveStatus};
use utoipa::ToSchema;
use uuid::Uuid;

/// LeaveRecord serializer DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LeaveRecordSerializer {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: LeaveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LeaveRecord> for LeaveRecordSerializer {
    fn from(record: LeaveRecord) -> Self {
        Self {
            id: record.id,
            employee_id: record.employee_id,
            start_date: record.start_date,
            end_date: record.end_date,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
