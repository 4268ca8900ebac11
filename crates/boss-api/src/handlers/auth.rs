//! Authentication handlers
//!
//! Endpoints for registration, login, logout and the current user. Tokens are
//! delivered as cookies, never in the body.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use boss_service::{AuthResponse, AuthService, LoginRequest, MessageResponse, RegisterRequest};

use crate::cookies::{cookie_value, REFRESH_TOKEN_COOKIE};
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new user and sign them in
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<(CookieJar, Json<AuthResponse>)>> {
    let result = AuthService::new(state.service_context())
        .register(request)
        .await?;

    let body = AuthResponse::from(&result.user);
    let jar = state.cookies().set_session(jar, result.tokens);
    Ok(Created((jar, Json(body))))
}

/// Login with username and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let result = AuthService::new(state.service_context())
        .login(request)
        .await?;

    let body = AuthResponse::from(&result.user);
    let jar = state.cookies().set_session(jar, result.tokens);
    Ok((jar, Json(body)))
}

/// Revoke the refresh cookie's token and clear both cookies. Always succeeds.
///
/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let refresh_token = cookie_value(&jar, REFRESH_TOKEN_COOKIE);
    AuthService::new(state.service_context())
        .logout(refresh_token.as_deref())
        .await;

    let jar = state.cookies().clear_session(jar);
    (jar, Json(MessageResponse::new("logged out successfully")))
}

/// Get the signed-in user
///
/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<AuthResponse>> {
    let user = AuthService::new(state.service_context())
        .me(current.user_id)
        .await?;
    Ok(Json(AuthResponse::from(&user)))
}
