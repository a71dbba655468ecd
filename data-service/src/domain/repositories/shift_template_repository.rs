use async_trait::async_trait;
use shared::{DomainResult, PaginationParams, ShiftTemplate, ShiftTypeKey};
use uuid::Uuid;

use crate::api::requests::{CreateShiftTemplateRequest, UpdateShiftTemplateRequest};

#[async_trait]
pub trait ShiftTemplateRepository: Send + Sync {
    /// Create a new shift template.
    async fn create(&self, request: CreateShiftTemplateRequest) -> DomainResult<ShiftTemplate>;

    /// Find template by ID.
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<ShiftTemplate>>;

    /// Find templates registered for a shift type, most-used first. The
    /// scheduling engine uses the first result to stamp default times and
    /// metadata onto a newly generated Shift.
    async fn find_by_shift_type(&self, shift_type: ShiftTypeKey) -> DomainResult<Vec<ShiftTemplate>>;

    /// List all templates, paginated.
    async fn list(&self, params: PaginationParams) -> DomainResult<(Vec<ShiftTemplate>, u64)>;

    /// Update a template's descriptive fields by ID.
    async fn update(
        &self,
        id: Uuid,
        request: UpdateShiftTemplateRequest,
    ) -> DomainResult<ShiftTemplate>;

    /// Delete a template by ID.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;

    /// Bump `usage_count` by one, called each time a generated Shift is
    /// stamped from this template.
    async fn increment_usage(&self, id: Uuid) -> DomainResult<()>;
}
