//! Catalog handlers

use axum::{extract::State, Json};
use boss_service::{CatalogService, ProductionBuildingResponse, ResourceResponse};

use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/resources
pub async fn list_resources(State(state): State<AppState>) -> ApiResult<Json<Vec<ResourceResponse>>> {
    let resources = CatalogService::new(state.service_context())
        .list_resources()
        .await?;
    Ok(Json(resources.into_iter().map(ResourceResponse::from).collect()))
}

/// GET /api/production-buildings
pub async fn list_production_buildings(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ProductionBuildingResponse>>> {
    let buildings = CatalogService::new(state.service_context())
        .list_production_buildings()
        .await?;
    Ok(Json(buildings))
}
