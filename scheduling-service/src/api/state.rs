use std::sync::Arc;

use shared::RedisPool;

use crate::domain::orchestrator::Orchestrator;
use crate::infrastructure::planning_run_store::PlanningRunStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub planning_run_store: Arc<dyn PlanningRunStore>,
    /// `None` in tests that don't stand up a Redis connection; `get_plan`
    /// falls back to `planning_run_store` directly when unset.
    pub redis_pool: Option<RedisPool>,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>, planning_run_store: Arc<dyn PlanningRunStore>) -> Self {
        Self {
            orchestrator,
            planning_run_store,
            redis_pool: None,
        }
    }

    pub fn with_redis(mut self, redis_pool: RedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }
}
