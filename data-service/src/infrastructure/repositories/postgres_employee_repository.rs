use async_trait::async_trait;
use shared::{DomainError, DomainResult, Employee, PaginationParams};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::requests::{CreateEmployeeRequest, UpdateEmployeeRequest};
use crate::domain::repositories::EmployeeRepository;

pub struct PostgresEmployeeRepository {
    pool: PgPool,
}

impl PostgresEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    async fn create(&self, request: CreateEmployeeRequest) -> DomainResult<Employee> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (
                team_scope, display_name, fte, available_for_incidents,
                available_for_waakdienst, hire_date, active
            )
            VALUES ($1, $2, $3, $4, $5, $6, true)
            RETURNING id, team_scope, display_name, fte, available_for_incidents,
                      available_for_waakdienst, hire_date, active, created_at, updated_at
            "#,
        )
        .bind(&request.team_scope)
        .bind(&request.display_name)
        .bind(request.fte)
        .bind(request.available_for_incidents)
        .bind(request.available_for_waakdienst)
        .bind(request.hire_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(employee)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, team_scope, display_name, fte, available_for_incidents,
                   available_for_waakdienst, hire_date, active, created_at, updated_at
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(employee)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, team_scope, display_name, fte, available_for_incidents,
                   available_for_waakdienst, hire_date, active, created_at, updated_at
            FROM employees
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(employees)
    }

    async fn list_by_team(
        &self,
        team_scope: &str,
        params: PaginationParams,
    ) -> DomainResult<(Vec<Employee>, u64)> {
        let offset = (params.page - 1) * params.page_size;

        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, team_scope, display_name, fte, available_for_incidents,
                   available_for_waakdienst, hire_date, active, created_at, updated_at
            FROM employees
            WHERE team_scope = $1
            ORDER BY hire_date ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(team_scope)
        .bind(params.page_size as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employees WHERE team_scope = $1")
            .bind(team_scope)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok((employees, total.0 as u64))
    }

    async fn list_active_by_team(&self, team_scope: &str) -> DomainResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, team_scope, display_name, fte, available_for_incidents,
                   available_for_waakdienst, hire_date, active, created_at, updated_at
            FROM employees
            WHERE team_scope = $1 AND active = true
            ORDER BY hire_date ASC
            "#,
        )
        .bind(team_scope)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(employees)
    }

    async fn update(&self, id: Uuid, request: UpdateEmployeeRequest) -> DomainResult<Employee> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Employee with id {} not found", id)))?;

        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET display_name = $1, fte = $2, available_for_incidents = $3,
                available_for_waakdienst = $4, active = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING id, team_scope, display_name, fte, available_for_incidents,
                      available_for_waakdienst, hire_date, active, created_at, updated_at
            "#,
        )
        .bind(request.display_name.unwrap_or(current.display_name))
        .bind(request.fte.unwrap_or(current.fte))
        .bind(
            request
                .available_for_incidents
                .unwrap_or(current.available_for_incidents),
        )
        .bind(
            request
                .available_for_waakdienst
                .unwrap_or(current.available_for_waakdienst),
        )
        .bind(request.active.unwrap_or(current.active))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(employee)
    }
}
