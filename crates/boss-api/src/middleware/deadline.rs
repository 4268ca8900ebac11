//! Per-request deadline

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tokio::time::Instant;

use crate::extractors::RequestDeadline;
use crate::state::AppState;

/// Stamp the request with the instant its store work must finish by
pub async fn stamp_deadline(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let deadline = Instant::now() + state.service_context().request_timeout();
    request.extensions_mut().insert(RequestDeadline(deadline));
    next.run(request).await
}
