use chrono::NaiveDate;
use serde::Deserialize;
use shared::LeaveStatus;
use utoipa::ToSchema;
use uuid::Uuid;

/// Request to create a new leave record. New records are created as
/// `Pending`; only `Approved` records are load-bearing for the engine.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLeaveRecordRequest {
    pub employee_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Request to transition a leave record's approval status.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLeaveStatusRequest {
    pub status: LeaveStatus,
}
