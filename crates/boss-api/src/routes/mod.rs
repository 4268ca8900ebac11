//! Route definitions
//!
//! All game routes are mounted under /api. Health probes sit outside so they
//! skip rate limiting.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, catalog, companies, health, inventory, market};
use crate::middleware::require_session;
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new().nest(
        "/api",
        public_routes().merge(protected_routes(state)),
    )
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Routes reachable without a session
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/resources", get(catalog::list_resources))
        .route("/production-buildings", get(catalog::list_production_buildings))
}

/// Routes behind the session guard
fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(auth::me))
        .route("/companies", post(companies::create_company))
        .route("/companies/me", get(companies::get_my_company))
        .route("/inventory", get(inventory::list_inventory))
        .route("/market/buy", post(market::buy))
        .route("/market/sell", post(market::sell))
        .route_layer(from_fn_with_state(state.clone(), require_session))
}
