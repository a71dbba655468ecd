use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{DomainResult, ShiftTypeKey};
use uuid::Uuid;

use crate::api::requests::ApplyShiftsRequest;
use crate::domain::entities::Shift;

#[async_trait]
pub trait ShiftRepository: Send + Sync {
    /// Shifts of the given employees overlapping `[range_start, range_end)`.
    /// `Cancelled` shifts are excluded unless `include_cancelled`.
    async fn list_in_range(
        &self,
        employee_ids: &[Uuid],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
        include_cancelled: bool,
    ) -> DomainResult<Vec<Shift>>;

    /// Raw (unweighted) assignment count per employee for `shift_type` since
    /// `since`. The scheduling engine applies its own fairness weight on top
    /// of this count — this repository has no notion of fairness.
    async fn history_raw_counts(
        &self,
        employee_ids: &[Uuid],
        shift_type: ShiftTypeKey,
        since: DateTime<Utc>,
    ) -> DomainResult<HashMap<Uuid, i64>>;

    /// Apply a batch of shifts atomically: acquire an advisory lock scoped to
    /// `(team_scope, horizon_start, horizon_end)`, re-check the batch against
    /// current state, insert, and commit — or roll back on the first
    /// overlap. Returns `DomainError::ConflictOnApply` if any shift in the
    /// batch overlaps an existing non-cancelled shift of the same employee.
    async fn apply(&self, request: ApplyShiftsRequest) -> DomainResult<Vec<Shift>>;
}
