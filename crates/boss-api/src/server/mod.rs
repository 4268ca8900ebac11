//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use boss_common::{AppConfig, AppError, JwtService};
use boss_core::Money;
use boss_db::{
    create_pool, default_migrations_dir, run_migrations, PgCompanyRepository,
    PgInventoryRepository, PgProcessResourceRepository, PgProductionBuildingRepository,
    PgProductionProcessRepository, PgRefreshTokenRepository, PgResourceRepository,
    PgUserRepository,
};
use boss_service::{SeedService, ServiceContextBuilder, SessionManager};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let api = apply_rate_limit(create_router(&state), &state.config().rate_limit);
    let router = api.merge(health_routes());
    let router = apply_middleware(router, &state);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
///
/// Connects to PostgreSQL, applies migrations and seeds the catalogs.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = boss_db::DatabaseConfig::new(
        config.database.url.clone(),
        config.database.max_connections,
        config.database.min_connections,
    );
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let migrations_dir = config
        .database
        .migrations_dir
        .clone()
        .unwrap_or_else(default_migrations_dir);
    run_migrations(&pool, &migrations_dir)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .refresh_token_repo(Arc::new(PgRefreshTokenRepository::new(pool.clone())))
        .company_repo(Arc::new(PgCompanyRepository::new(pool.clone())))
        .resource_repo(Arc::new(PgResourceRepository::new(pool.clone())))
        .inventory_repo(Arc::new(PgInventoryRepository::new(pool.clone())))
        .building_repo(Arc::new(PgProductionBuildingRepository::new(pool.clone())))
        .process_repo(Arc::new(PgProductionProcessRepository::new(pool.clone())))
        .process_resource_repo(Arc::new(PgProcessResourceRepository::new(pool)))
        .jwt_service(jwt_service)
        .refresh_token_expiry(config.jwt.refresh_token_expiry)
        .initial_company_money(Money::from_thousandths(config.game.initial_company_money))
        .request_timeout(Duration::from_secs(config.app.request_timeout_secs))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    SeedService::new(&service_context)
        .run(
            &config.catalog.resources_file,
            &config.catalog.production_buildings_file,
        )
        .await;

    Ok(AppState::new(service_context, config))
}

/// Periodically delete expired refresh tokens
pub fn spawn_refresh_token_sweeper(state: AppState) -> JoinHandle<()> {
    let period = Duration::from_secs(state.config().jwt.sweep_interval_secs.max(1));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match SessionManager::new(state.service_context()).sweep_expired().await {
                Ok(removed) => debug!(removed, "Expired refresh tokens swept"),
                Err(e) => warn!(error = %e, "Refresh token sweep failed"),
            }
        }
    })
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    let local: Option<SocketAddr> = listener.local_addr().ok();
    info!(address = ?local, "Server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();

    let state = create_app_state(config).await?;
    let sweeper = spawn_refresh_token_sweeper(state.clone());

    let app = create_app(state);
    let result = run_server(app, &addr).await;

    sweeper.abort();
    result
}
