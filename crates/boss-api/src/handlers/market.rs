//! Market handlers

use axum::{extract::State, Json};
use boss_service::{MarketService, MessageResponse, TradeRequest};

use crate::extractors::{CurrentUser, RequestDeadline, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Buy packs of a resource for the caller's company
///
/// POST /api/market/buy
pub async fn buy(
    State(state): State<AppState>,
    current: CurrentUser,
    RequestDeadline(deadline): RequestDeadline,
    ValidatedJson(request): ValidatedJson<TradeRequest>,
) -> ApiResult<Json<MessageResponse>> {
    MarketService::new(state.service_context())
        .buy_for_user(current.user_id, request, deadline)
        .await?;
    Ok(Json(MessageResponse::new("Resource purchased successfully")))
}

/// Sell packs of a resource from the caller's company
///
/// POST /api/market/sell
pub async fn sell(
    State(state): State<AppState>,
    current: CurrentUser,
    RequestDeadline(deadline): RequestDeadline,
    ValidatedJson(request): ValidatedJson<TradeRequest>,
) -> ApiResult<Json<MessageResponse>> {
    MarketService::new(state.service_context())
        .sell_for_user(current.user_id, request, deadline)
        .await?;
    Ok(Json(MessageResponse::new("Resource sold successfully")))
}
