//! Authenticated user extractor
//!
//! The session middleware resolves the caller from the access cookie, the
//! `Authorization: Bearer` header or the refresh cookie and stores the result
//! in the request extensions. Handlers pick it up with `CurrentUser`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use boss_common::{AppError, Claims};
use boss_core::UserId;

use crate::response::ApiError;

/// Identity of the authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub username: String,
}

impl CurrentUser {
    /// Create a new CurrentUser
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }

    /// Identity carried by validated access token claims
    ///
    /// # Errors
    /// `InvalidToken` when the subject is not a user id
    pub fn from_claims(claims: &Claims) -> Result<Self, AppError> {
        Ok(Self::new(claims.user_id()?, claims.username.clone()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(ApiError::App(AppError::MissingAuth))
    }
}
