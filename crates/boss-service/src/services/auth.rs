//! Authentication service
//!
//! Handles user registration, login, logout and the current-user lookup.

use boss_common::auth::{
    hash_password, validate_password_strength, verify_dummy_password, verify_password,
};
use boss_common::AppError;
use boss_core::entities::{NewUser, User};
use boss_core::{DomainError, UserId};
use tracing::{debug, info, instrument, warn};

use crate::dto::{LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::{SessionManager, TokenPair};

/// A signed-in user together with the tokens to hand back as cookies
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user: User,
    pub tokens: TokenPair,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and sign them in
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResult> {
        validate_password_strength(&request.password)?;

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        let user = self
            .ctx
            .user_repo()
            .create(NewUser {
                username: request.username,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered successfully");

        let tokens = SessionManager::new(self.ctx)
            .issue(user.id, &user.username)
            .await?;

        Ok(AuthResult { user, tokens })
    }

    /// Login with username and password
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResult> {
        // Unknown user and wrong password are indistinguishable to the caller
        let Some(user) = self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await?
        else {
            verify_dummy_password(&request.password);
            warn!("Login failed: user not found");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        };

        let is_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in successfully");

        let tokens = SessionManager::new(self.ctx)
            .issue(user.id, &user.username)
            .await?;

        Ok(AuthResult { user, tokens })
    }

    /// Revoke the presented refresh token. Never fails.
    #[instrument(skip(self, refresh_token))]
    pub async fn logout(&self, refresh_token: Option<&str>) {
        let Some(token) = refresh_token.filter(|t| !t.is_empty()) else {
            debug!("Logout without refresh token");
            return;
        };

        match SessionManager::new(self.ctx).revoke(token).await {
            Ok(true) => info!("Refresh token revoked"),
            Ok(false) => debug!("Logout with unknown or already revoked token"),
            Err(e) => warn!(error = %e, "Failed to revoke refresh token on logout"),
        }
    }

    /// Get the current user
    #[instrument(skip(self))]
    pub async fn me(&self, user_id: UserId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }
}
