mod api;
mod domain;
mod infrastructure;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;
use shared::create_redis_pool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::AppState;
use domain::orchestrator::Orchestrator;
use domain::shift_types::{Calendar, FixedHolidayCalendar, IncidentsScheduler, IncidentsStandbyScheduler, ShiftTypePolicy, ShiftTypeScheduler, WaakdienstScheduler};
use infrastructure::{
    config::Settings,
    database,
    planning_run_store::{PlanningRunStore, PostgresPlanningRunStore},
    repository_client::HttpRepositoryClient,
};
use shared::ShiftTypeKey;

fn build_scheduler(policy: ShiftTypePolicy) -> Arc<dyn ShiftTypeScheduler> {
    match policy.shift_type {
        ShiftTypeKey::Incidents => Arc::new(IncidentsScheduler::new(policy)),
        ShiftTypeKey::IncidentsStandby => Arc::new(IncidentsStandbyScheduler::new(policy)),
        ShiftTypeKey::Waakdienst => Arc::new(WaakdienstScheduler::new(policy)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scheduling_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Scheduling Service...");

    // Load configuration
    let settings = Settings::new()?;
    tracing::info!("Configuration loaded: {:?}", settings);

    // Initialize database pool and run migrations for the planning run store
    let db_pool =
        database::create_pool(&settings.database.url, settings.database.max_connections).await?;
    tracing::info!("Database connection pool created");

    database::run_migrations(&db_pool).await?;
    tracing::info!("Database migrations completed");

    // Initialize Redis connection, used to cache committed planning runs
    let redis_pool = create_redis_pool(&settings.redis.url).await?;
    tracing::info!("Redis connection established");

    // Build the Shift-type Schedulers from the configured policies
    let schedulers: Vec<Arc<dyn ShiftTypeScheduler>> = settings
        .shift_types
        .iter()
        .map(|s| {
            build_scheduler(ShiftTypePolicy {
                shift_type: s.key,
                label: s.label.clone(),
                mutex_group: s.mutex_group.clone(),
                fairness_weight: s.fairness_weight,
                holiday_policy: s.holiday_policy,
                priority: s.priority,
            })
        })
        .collect();

    let fairness_weight: HashMap<ShiftTypeKey, u32> = settings
        .shift_types
        .iter()
        .map(|s| (s.key, s.fairness_weight))
        .collect();

    let calendar: Arc<dyn Calendar> = Arc::new(FixedHolidayCalendar::empty());

    let repository = Arc::new(HttpRepositoryClient::new(
        Client::new(),
        settings.data_service.url.clone(),
        fairness_weight,
    ));

    let orchestrator = Orchestrator::new(
        schedulers,
        calendar,
        repository,
        settings.fairness_config(),
        settings.fairness.history_window_days,
        settings.team_timezone(),
        settings.apply.default_deadline_ms,
    )?;

    tracing::info!("Orchestrator initialized with {} shift-type schedulers", settings.shift_types.len());

    let planning_run_store: Arc<dyn PlanningRunStore> = Arc::new(PostgresPlanningRunStore::new(db_pool));

    // Create application state
    let app_state = AppState::new(Arc::new(orchestrator), planning_run_store).with_redis(redis_pool);

    // Create router
    let app = api::create_router(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(settings.server_address()).await?;
    let addr = listener.local_addr()?;
    tracing::info!("Scheduling Service listening on {}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
