//! Request deadline extractor

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tokio::time::Instant;

use crate::state::AppState;

/// Instant by which the current request must finish its store work.
///
/// Stamped by the deadline middleware when the request arrives; when absent
/// the configured request timeout is counted from extraction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestDeadline(pub Instant);

#[async_trait]
impl<S> FromRequestParts<S> for RequestDeadline
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(deadline) = parts.extensions.get::<RequestDeadline>() {
            return Ok(*deadline);
        }

        let timeout = AppState::from_ref(state).service_context().request_timeout();
        Ok(RequestDeadline(Instant::now() + timeout))
    }
}
