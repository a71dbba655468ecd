use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};

pub type RedisPool = ConnectionManager;

/// Create a Redis connection pool
pub async fn create_redis_pool(redis_url: &str) -> Result<RedisPool, RedisError> {
    let client = Client::open(redis_url)?;
    ConnectionManager::new(client).await
}

/// Cache key constants for employee and history lookups
pub mod cache_keys {
    use uuid::Uuid;

    /// Generate cache key for the active employee list of a team
    pub fn team_employees(team_scope: &str) -> String {
        format!("team:employees:{}", team_scope)
    }

    /// Pattern to match all team-employees cache keys
    pub const TEAM_EMPLOYEES_PATTERN: &str = "team:employees:*";

    /// Generate cache key for a planning run's persisted outcome
    pub fn planning_run(run_id: Uuid) -> String {
        format!("planning_run:result:{}", run_id)
    }

    /// Pattern to match all planning-run cache keys
    pub const PLANNING_RUN_PATTERN: &str = "planning_run:result:*";
}

/// Cache TTL constants (in seconds)
pub mod cache_ttl {
    /// TTL for a team's employee list (5 minutes)
    pub const TEAM_EMPLOYEES: u64 = 300;

    /// TTL for a persisted planning-run outcome (1 hour)
    pub const PLANNING_RUN: u64 = 3600;
}

/// Invalidate a specific cache key
pub async fn invalidate_cache(redis_conn: &mut ConnectionManager, key: &str) {
    let _: Result<(), _> = redis_conn.del(key).await;
}

/// Invalidate multiple cache keys by pattern
pub async fn invalidate_cache_pattern(redis_conn: &mut ConnectionManager, pattern: &str) {
    let keys: Result<Vec<String>, _> = redis_conn.keys(pattern).await;
    if let Ok(keys) = keys {
        if !keys.is_empty() {
            let _: Result<(), _> = redis::cmd("DEL").arg(&keys).query_async(redis_conn).await;
        }
    }
}

/// Get a cached value
pub async fn get_cached<T: serde::de::DeserializeOwned>(
    redis_conn: &mut ConnectionManager,
    key: &str,
) -> Option<T> {
    let cached: Result<String, _> = redis_conn.get(key).await;
    if let Ok(cached_data) = cached {
        serde_json::from_str(&cached_data).ok()
    } else {
        None
    }
}

/// Set a cached value with TTL
pub async fn set_cached<T: serde::Serialize>(
    redis_conn: &mut ConnectionManager,
    key: &str,
    value: &T,
    ttl_seconds: u64,
) {
    if let Ok(json) = serde_json::to_string(value) {
        let _: Result<(), _> = redis_conn.set_ex(key, json, ttl_seconds).await;
    }
}
