//! Inventory handlers

use axum::{extract::State, Json};
use boss_service::{CompanyService, InventoryItemResponse, InventoryService};

use crate::extractors::CurrentUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// List what the caller's company holds
///
/// GET /api/inventory
pub async fn list_inventory(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<Vec<InventoryItemResponse>>> {
    let ctx = state.service_context();
    let company = CompanyService::new(ctx).get_by_user(current.user_id).await?;
    let items = InventoryService::new(ctx).list_for_company(company.id).await?;
    Ok(Json(items.into_iter().map(InventoryItemResponse::from).collect()))
}
