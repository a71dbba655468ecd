use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{DomainResult, LeaveRecord, PaginationParams};
use uuid::Uuid;

use crate::api::requests::{CreateLeaveRecordRequest, UpdateLeaveStatusRequest};

#[async_trait]
pub trait LeaveRecordRepository: Send + Sync {
    /// Create a new leave record in `Pending` status.
    async fn create(&self, request: CreateLeaveRecordRequest) -> DomainResult<LeaveRecord>;

    /// Find leave record by ID.
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<LeaveRecord>>;

    /// List leave records for one employee, paginated.
    async fn list_by_employee(
        &self,
        employee_id: Uuid,
        params: PaginationParams,
    ) -> DomainResult<(Vec<LeaveRecord>, u64)>;

    /// List `Approved` leave records for a set of employees that overlap
    /// `[range_start, range_end_exclusive)`. This is the view consumed by the
    /// scheduling engine's Repository Interface.
    async fn list_approved_overlapping(
        &self,
        employee_ids: &[Uuid],
        range_start: NaiveDate,
        range_end_exclusive: NaiveDate,
    ) -> DomainResult<Vec<LeaveRecord>>;

    /// Transition a leave record's status.
    async fn update_status(
        &self,
        id: Uuid,
        request: UpdateLeaveStatusRequest,
    ) -> DomainResult<LeaveRecord>;
}
