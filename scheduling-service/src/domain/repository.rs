use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{DomainResult, Employee, LeaveRecord, ShiftTemplate, ShiftTypeKey};
use uuid::Uuid;

use super::entities::Shift;

/// The narrow abstract interface the engine uses for all I/O. Any
/// persistent store may implement it; an in-memory implementation exists
/// for tests (`infrastructure::in_memory_repository`) and an HTTP-backed one
/// calls `data-service` in production (`infrastructure::repository_client`).
#[async_trait]
pub trait SchedulingRepository: Send + Sync {
    async fn list_employees(&self, team_scope: &str) -> DomainResult<Vec<Employee>>;

    async fn list_approved_leaves(
        &self,
        employee_ids: &[Uuid],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> DomainResult<Vec<LeaveRecord>>;

    async fn list_shifts(
        &self,
        employee_ids: &[Uuid],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
        include_cancelled: bool,
    ) -> DomainResult<Vec<Shift>>;

    /// Weighted-day count per employee for `shift_type` since `since`,
    /// already multiplied by that shift type's `fairness_weight` — the
    /// repository, not the caller, owns translating raw assignment counts
    /// into load days.
    async fn history_counts(
        &self,
        employee_ids: &[Uuid],
        shift_type: ShiftTypeKey,
        since: DateTime<Utc>,
    ) -> DomainResult<HashMap<Uuid, f64>>;

    async fn template_for(&self, shift_type: ShiftTypeKey) -> DomainResult<ShiftTemplate>;

    async fn begin_apply(
        &self,
        team_scope: &str,
        horizon_start: DateTime<Utc>,
        horizon_end: DateTime<Utc>,
    ) -> DomainResult<Box<dyn ApplyTransaction>>;
}

/// A single Apply-mode transaction. The Apply path must be serialisable
/// with respect to any other writer of Shifts within the same horizon and
/// team scope: `begin_apply` acquires a write lock scoped to
/// `(team_scope, horizon_start, horizon_end)`, `check_no_new_conflicts`
/// re-runs overlap detection against current state (not the preview
/// snapshot), and `write_shifts` + `commit` apply everything atomically.
/// Dropping the transaction without `commit` must behave as `rollback`.
#[async_trait]
pub trait ApplyTransaction: Send + Sync {
    /// Re-check the given tentative assignments against the repository's
    /// *current* state. Returns `true` if none conflict.
    async fn check_no_new_conflicts(&mut self, tentative: &[Shift]) -> DomainResult<bool>;

    async fn write_shifts(&mut self, shifts: Vec<Shift>) -> DomainResult<()>;

    async fn commit(self: Box<Self>) -> DomainResult<()>;

    async fn rollback(self: Box<Self>) -> DomainResult<()>;
}
