//! Session middleware for protected routes
//!
//! Resolution order: the `access_token` cookie, then an
//! `Authorization: Bearer` header, then the `refresh_token` cookie. A caller
//! that only holds a live refresh token is signed in silently and receives a
//! fresh access cookie with the response.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use boss_common::AppError;
use boss_service::SessionManager;
use tracing::debug;

use crate::cookies::{cookie_value, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::extractors::CurrentUser;
use crate::response::ApiError;
use crate::state::AppState;

/// Require an authenticated caller and expose it as `CurrentUser`
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let sessions = SessionManager::new(state.service_context());
    let mut failure = ApiError::App(AppError::MissingAuth);

    let access = cookie_value(&jar, ACCESS_TOKEN_COOKIE).or_else(|| bearer_token(request.headers()));
    if let Some(token) = access {
        match sessions.validate_access(&token) {
            Ok(claims) => {
                request
                    .extensions_mut()
                    .insert(CurrentUser::from_claims(&claims)?);
                return Ok(next.run(request).await);
            }
            Err(e) => {
                debug!(error = %e, "Access token rejected");
                failure = e.into();
            }
        }
    }

    let Some(refresh) = cookie_value(&jar, REFRESH_TOKEN_COOKIE) else {
        return Err(failure);
    };

    match sessions.refresh(&refresh).await {
        Ok(session) => {
            debug!(user_id = %session.user_id, "Session refreshed from refresh cookie");
            request
                .extensions_mut()
                .insert(CurrentUser::new(session.user_id, session.username));
            let jar = jar.add(state.cookies().access_cookie(session.access.token));
            let response = next.run(request).await;
            Ok((jar, response).into_response())
        }
        Err(e) => {
            debug!(error = %e, "Refresh token rejected");
            Err(failure)
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
