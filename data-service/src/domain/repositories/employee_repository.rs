use async_trait::async_trait;
use shared::{DomainResult, Employee, PaginationParams};
use uuid::Uuid;

use crate::api::requests::{CreateEmployeeRequest, UpdateEmployeeRequest};

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Create a new employee.
    async fn create(&self, request: CreateEmployeeRequest) -> DomainResult<Employee>;

    /// Find employee by ID.
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Employee>>;

    /// Find employees by a batch of IDs, in one query.
    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Employee>>;

    /// List employees in a team, paginated.
    async fn list_by_team(
        &self,
        team_scope: &str,
        params: PaginationParams,
    ) -> DomainResult<(Vec<Employee>, u64)>;

    /// List all active employees in a team, unpaginated. This is the view
    /// consumed by the scheduling engine's Repository Interface.
    async fn list_active_by_team(&self, team_scope: &str) -> DomainResult<Vec<Employee>>;

    /// Update employee by ID.
    async fn update(&self, id: Uuid, request: UpdateEmployeeRequest) -> DomainResult<Employee>;
}
