use async_trait::async_trait;
use shared::{DomainError, DomainResult, PaginationParams, ShiftTemplate, ShiftTypeKey};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::requests::{CreateShiftTemplateRequest, UpdateShiftTemplateRequest};
use crate::domain::repositories::ShiftTemplateRepository;

pub struct PostgresShiftTemplateRepository {
    pool: PgPool,
}

impl PostgresShiftTemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShiftTemplateRepository for PostgresShiftTemplateRepository {
    async fn create(&self, request: CreateShiftTemplateRequest) -> DomainResult<ShiftTemplate> {
        let template = sqlx::query_as::<_, ShiftTemplate>(
            r#"
            INSERT INTO shift_templates (
                shift_type, default_start_time, default_end_time, notes, tags
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, shift_type, default_start_time, default_end_time, notes, tags,
                      favourite_count, usage_count, created_at, updated_at
            "#,
        )
        .bind(&request.shift_type)
        .bind(request.default_start_time)
        .bind(request.default_end_time)
        .bind(&request.notes)
        .bind(&request.tags)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(template)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<ShiftTemplate>> {
        let template = sqlx::query_as::<_, ShiftTemplate>(
            r#"
            SELECT id, shift_type, default_start_time, default_end_time, notes, tags,
                   favourite_count, usage_count, created_at, updated_at
            FROM shift_templates
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(template)
    }

    async fn find_by_shift_type(&self, shift_type: ShiftTypeKey) -> DomainResult<Vec<ShiftTemplate>> {
        let templates = sqlx::query_as::<_, ShiftTemplate>(
            r#"
            SELECT id, shift_type, default_start_time, default_end_time, notes, tags,
                   favourite_count, usage_count, created_at, updated_at
            FROM shift_templates
            WHERE shift_type = $1
            ORDER BY usage_count DESC
            "#,
        )
        .bind(&shift_type)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(templates)
    }

    async fn list(&self, params: PaginationParams) -> DomainResult<(Vec<ShiftTemplate>, u64)> {
        let offset = (params.page - 1) * params.page_size;

        let templates = sqlx::query_as::<_, ShiftTemplate>(
            r#"
            SELECT id, shift_type, default_start_time, default_end_time, notes, tags,
                   favourite_count, usage_count, created_at, updated_at
            FROM shift_templates
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(params.page_size as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM shift_templates")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok((templates, total.0 as u64))
    }

    async fn update(
        &self,
        id: Uuid,
        request: UpdateShiftTemplateRequest,
    ) -> DomainResult<ShiftTemplate> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Template with id {} not found", id)))?;

        let template = sqlx::query_as::<_, ShiftTemplate>(
            r#"
            UPDATE shift_templates
            SET default_start_time = $1, default_end_time = $2, notes = $3, tags = $4,
                updated_at = NOW()
            WHERE id = $5
            RETURNING id, shift_type, default_start_time, default_end_time, notes, tags,
                      favourite_count, usage_count, created_at, updated_at
            "#,
        )
        .bind(request.default_start_time.unwrap_or(current.default_start_time))
        .bind(request.default_end_time.unwrap_or(current.default_end_time))
        .bind(request.notes.or(current.notes))
        .bind(request.tags.unwrap_or(current.tags))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(template)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM shift_templates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!(
                "Template with id {} not found",
                id
            )));
        }

        Ok(())
    }

    async fn increment_usage(&self, id: Uuid) -> DomainResult<()> {
        sqlx::query("UPDATE shift_templates SET usage_count = usage_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
