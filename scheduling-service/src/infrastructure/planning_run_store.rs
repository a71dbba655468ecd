use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use shared::{DomainResult, PlanMode};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::PlanningRun;

/// Persists committed `PlanningRun`s so `GET /plan/{run_id}` can retrieve
/// them after the fact. Preview runs are never passed to `save`.
#[async_trait]
pub trait PlanningRunStore: Send + Sync {
    async fn save(&self, run: &PlanningRun) -> DomainResult<()>;
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<PlanningRun>>;
}

pub struct PostgresPlanningRunStore {
    pool: PgPool,
}

impl PostgresPlanningRunStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PlanningRunRow {
    id: Uuid,
    team_scope: String,
    horizon_start: chrono::DateTime<chrono::Utc>,
    horizon_end: chrono::DateTime<chrono::Utc>,
    initiator: String,
    requested_at: chrono::DateTime<chrono::Utc>,
    mode: PlanMode,
    committed: bool,
    outcome: sqlx::types::Json<crate::domain::entities::PersistedOutcome>,
}

impl From<PlanningRunRow> for PlanningRun {
    fn from(row: PlanningRunRow) -> Self {
        PlanningRun {
            id: row.id,
            team_scope: row.team_scope,
            horizon_start: row.horizon_start,
            horizon_end: row.horizon_end,
            initiator: row.initiator,
            requested_at: row.requested_at,
            mode: row.mode,
            committed: row.committed,
            outcome: row.outcome.0,
        }
    }
}

#[async_trait]
impl PlanningRunStore for PostgresPlanningRunStore {
    async fn save(&self, run: &PlanningRun) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO planning_runs
                (id, team_scope, horizon_start, horizon_end, initiator, requested_at, mode, committed, outcome)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                committed = EXCLUDED.committed,
                outcome = EXCLUDED.outcome
            "#,
        )
        .bind(run.id)
        .bind(&run.team_scope)
        .bind(run.horizon_start)
        .bind(run.horizon_end)
        .bind(&run.initiator)
        .bind(run.requested_at)
        .bind(run.mode)
        .bind(run.committed)
        .bind(sqlx::types::Json(&run.outcome))
        .execute(&self.pool)
        .await
        .map_err(|e| shared::DomainError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<PlanningRun>> {
        let row = sqlx::query_as::<_, PlanningRunRow>(
            r#"
            SELECT id, team_scope, horizon_start, horizon_end, initiator,
                   requested_at, mode, committed, outcome
            FROM planning_runs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| shared::DomainError::DatabaseError(e.to_string()))?;

        Ok(row.map(PlanningRun::from))
    }
}

/// In-memory `PlanningRunStore` used by tests and anywhere a database-free
/// run is sufficient.
#[derive(Default)]
pub struct InMemoryPlanningRunStore {
    runs: RwLock<HashMap<Uuid, PlanningRun>>,
}

impl InMemoryPlanningRunStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlanningRunStore for InMemoryPlanningRunStore {
    async fn save(&self, run: &PlanningRun) -> DomainResult<()> {
        self.runs.write().unwrap().insert(run.id, run.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<PlanningRun>> {
        Ok(self.runs.read().unwrap().get(&id).cloned())
    }
}
