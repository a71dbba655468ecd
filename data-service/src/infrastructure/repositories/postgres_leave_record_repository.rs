use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{DomainError, DomainResult, LeaveRecord, PaginationParams};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::requests::{CreateLeaveRecordRequest, UpdateLeaveStatusRequest};
use crate::domain::repositories::LeaveRecordRepository;

pub struct PostgresLeaveRecordRepository {
    pool: PgPool,
}

impl PostgresLeaveRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaveRecordRepository for PostgresLeaveRecordRepository {
    async fn create(&self, request: CreateLeaveRecordRequest) -> DomainResult<LeaveRecord> {
        let record = sqlx::query_as::<_, LeaveRecord>(
            r#"
            INSERT INTO leave_records (employee_id, start_date, end_date, status)
            VALUES ($1, $2, $3, 'PENDING')
            RETURNING id, employee_id, start_date, end_date, status, created_at, updated_at
            "#,
        )
        .bind(request.employee_id)
        .bind(request.start_date)
        .bind(request.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<LeaveRecord>> {
        let record = sqlx::query_as::<_, LeaveRecord>(
            r#"
            SELECT id, employee_id, start_date, end_date, status, created_at, updated_at
            FROM leave_records
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(record)
    }

    async fn list_by_employee(
        &self,
        employee_id: Uuid,
        params: PaginationParams,
    ) -> DomainResult<(Vec<LeaveRecord>, u64)> {
        let offset = (params.page - 1) * params.page_size;

        let records = sqlx::query_as::<_, LeaveRecord>(
            r#"
            SELECT id, employee_id, start_date, end_date, status, created_at, updated_at
            FROM leave_records
            WHERE employee_id = $1
            ORDER BY start_date DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(employee_id)
        .bind(params.page_size as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        let total: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM leave_records WHERE employee_id = $1")
                .bind(employee_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok((records, total.0 as u64))
    }

    async fn list_approved_overlapping(
        &self,
        employee_ids: &[Uuid],
        range_start: NaiveDate,
        range_end_exclusive: NaiveDate,
    ) -> DomainResult<Vec<LeaveRecord>> {
        let records = sqlx::query_as::<_, LeaveRecord>(
            r#"
            SELECT id, employee_id, start_date, end_date, status, created_at, updated_at
            FROM leave_records
            WHERE employee_id = ANY($1)
              AND status = 'APPROVED'
              AND start_date < $3
              AND end_date >= $2
            "#,
        )
        .bind(employee_ids)
        .bind(range_start)
        .bind(range_end_exclusive)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(records)
    }

    async fn update_status(
        &self,
        id: Uuid,
        request: UpdateLeaveStatusRequest,
    ) -> DomainResult<LeaveRecord> {
        let record = sqlx::query_as::<_, LeaveRecord>(
            r#"
            UPDATE leave_records
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, employee_id, start_date, end_date, status, created_at, updated_at
            "#,
        )
        .bind(&request.status)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                DomainError::NotFound(format!("Leave record with id {} not found", id))
            }
            other => DomainError::DatabaseError(other.to_string()),
        })?;

        Ok(record)
    }
}
