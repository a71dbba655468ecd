use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{DomainError, DomainResult, ShiftTypeKey};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::requests::ApplyShiftsRequest;
use crate::domain::entities::Shift;
use crate::domain::repositories::ShiftRepository;

pub struct PostgresShiftRepository {
    pool: PgPool,
}

impl PostgresShiftRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Hashes `(team_scope, horizon_start, horizon_end)` into the signed 64-bit
/// key `pg_advisory_xact_lock` expects, so two apply calls for the same team
/// and horizon serialise against each other while disjoint ones don't.
fn advisory_lock_key(team_scope: &str, horizon_start: DateTime<Utc>, horizon_end: DateTime<Utc>) -> i64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in team_scope
        .bytes()
        .chain(horizon_start.timestamp().to_be_bytes())
        .chain(horizon_end.timestamp().to_be_bytes())
    {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash as i64
}

#[async_trait]
impl ShiftRepository for PostgresShiftRepository {
    async fn list_in_range(
        &self,
        employee_ids: &[Uuid],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
        include_cancelled: bool,
    ) -> DomainResult<Vec<Shift>> {
        let shifts = sqlx::query_as::<_, Shift>(
            r#"
            SELECT id, template_ref, shift_type, assigned_employee, start_instant,
                   end_instant, status, auto_generated, created_at, updated_at
            FROM shifts
            WHERE assigned_employee = ANY($1)
              AND start_instant < $3
              AND end_instant > $2
              AND ($4 OR status != 'CANCELLED')
            "#,
        )
        .bind(employee_ids)
        .bind(range_start)
        .bind(range_end)
        .bind(include_cancelled)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(shifts)
    }

    async fn history_raw_counts(
        &self,
        employee_ids: &[Uuid],
        shift_type: ShiftTypeKey,
        since: DateTime<Utc>,
    ) -> DomainResult<HashMap<Uuid, i64>> {
        let rows: Vec<(Uuid, i64)> = sqlx::query_as(
            r#"
            SELECT assigned_employee, COUNT(*) as count
            FROM shifts
            WHERE assigned_employee = ANY($1)
              AND shift_type = $2
              AND start_instant >= $3
              AND status != 'CANCELLED'
            GROUP BY assigned_employee
            "#,
        )
        .bind(employee_ids)
        .bind(shift_type)
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().collect())
    }

    async fn apply(&self, request: ApplyShiftsRequest) -> DomainResult<Vec<Shift>> {
        let lock_key = advisory_lock_key(&request.team_scope, request.horizon_start, request.horizon_end);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(lock_key)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        for shift in &request.shifts {
            let conflict: Option<(Uuid,)> = sqlx::query_as(
                r#"
                SELECT id FROM shifts
                WHERE assigned_employee = $1
                  AND status != 'CANCELLED'
                  AND start_instant < $3
                  AND end_instant > $2
                LIMIT 1
                "#,
            )
            .bind(shift.assigned_employee)
            .bind(shift.start_instant)
            .bind(shift.end_instant)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

            if conflict.is_some() {
                tx.rollback().await.map_err(|e| DomainError::DatabaseError(e.to_string()))?;
                return Err(DomainError::ConflictOnApply(format!(
                    "employee {} already has an overlapping shift",
                    shift.assigned_employee
                )));
            }
        }

        let mut written = Vec::with_capacity(request.shifts.len());
        for shift in &request.shifts {
            let row = sqlx::query_as::<_, Shift>(
                r#"
                INSERT INTO shifts (
                    id, template_ref, shift_type, assigned_employee,
                    start_instant, end_instant, status, auto_generated
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id, template_ref, shift_type, assigned_employee, start_instant,
                          end_instant, status, auto_generated, created_at, updated_at
                "#,
            )
            .bind(shift.id)
            .bind(shift.template_ref)
            .bind(shift.shift_type)
            .bind(shift.assigned_employee)
            .bind(shift.start_instant)
            .bind(shift.end_instant)
            .bind(shift.status)
            .bind(shift.auto_generated)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

            written.push(row);
        }

        tx.commit().await.map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(written)
    }
}
