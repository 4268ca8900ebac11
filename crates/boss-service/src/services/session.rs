//! Session/token manager
//!
//! Access tokens are stateless JWTs checked by signature and expiry alone.
//! Refresh tokens are opaque random strings; only their SHA-256 digest is
//! stored, so a leaked table cannot be replayed. Refreshing mints a new
//! access token and leaves the refresh token in place.

use boss_common::auth::{generate_refresh_token, hash_refresh_token, AccessToken, Claims};
use boss_common::AppError;
use boss_core::UserId;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Tokens handed to a client after a successful login or registration
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: AccessToken,
    /// Raw refresh token; never persisted in this form
    pub refresh_token: String,
    pub refresh_expires_at: DateTime<Utc>,
}

/// Identity re-derived from a refresh token together with its new access token
#[derive(Debug, Clone)]
pub struct RefreshedSession {
    pub user_id: UserId,
    pub username: String,
    pub access: AccessToken,
}

/// Session/token manager
pub struct SessionManager<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionManager<'a> {
    /// Create a new SessionManager
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mint an access token and a stored refresh token for a user
    #[instrument(skip(self))]
    pub async fn issue(&self, user_id: UserId, username: &str) -> ServiceResult<TokenPair> {
        let access = self.ctx.jwt_service().issue_access_token(user_id, username)?;

        let refresh_token = generate_refresh_token();
        let refresh_expires_at =
            Utc::now() + Duration::seconds(self.ctx.refresh_token_expiry());
        self.ctx
            .refresh_token_repo()
            .create(user_id, &hash_refresh_token(&refresh_token), refresh_expires_at)
            .await?;

        debug!(user_id = %user_id, "Issued token pair");

        Ok(TokenPair {
            access,
            refresh_token,
            refresh_expires_at,
        })
    }

    /// Verify an access token without touching the store
    pub fn validate_access(&self, token: &str) -> ServiceResult<Claims> {
        Ok(self.ctx.jwt_service().validate_access_token(token)?)
    }

    /// Resolve a refresh token to its owner if it is live
    #[instrument(skip(self, token))]
    pub async fn validate_refresh(&self, token: &str) -> ServiceResult<UserId> {
        if token.is_empty() {
            return Err(AppError::InvalidRefreshToken.into());
        }

        let stored = self
            .ctx
            .refresh_token_repo()
            .find_valid(&hash_refresh_token(token), Utc::now())
            .await?
            .ok_or(AppError::InvalidRefreshToken)?;

        Ok(stored.user_id)
    }

    /// Mint a new access token from a live refresh token
    #[instrument(skip(self, token))]
    pub async fn refresh(&self, token: &str) -> ServiceResult<RefreshedSession> {
        let user_id = self.validate_refresh(token).await?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::InvalidRefreshToken)?;

        let access = self
            .ctx
            .jwt_service()
            .issue_access_token(user.id, &user.username)?;

        debug!(user_id = %user.id, "Access token refreshed");

        Ok(RefreshedSession {
            user_id: user.id,
            username: user.username,
            access,
        })
    }

    /// Revoke a refresh token. Unknown or already revoked tokens are a no-op.
    #[instrument(skip(self, token))]
    pub async fn revoke(&self, token: &str) -> ServiceResult<bool> {
        if token.is_empty() {
            return Ok(false);
        }

        let revoked = self
            .ctx
            .refresh_token_repo()
            .revoke(&hash_refresh_token(token), Utc::now())
            .await?;
        Ok(revoked)
    }

    /// Revoke every live refresh token of a user
    #[instrument(skip(self))]
    pub async fn revoke_all_for_user(&self, user_id: UserId) -> ServiceResult<u64> {
        let revoked = self
            .ctx
            .refresh_token_repo()
            .revoke_all_for_user(user_id, Utc::now())
            .await?;

        info!(user_id = %user_id, revoked, "Revoked all sessions");
        Ok(revoked)
    }

    /// Delete refresh token rows past their expiry
    #[instrument(skip(self))]
    pub async fn sweep_expired(&self) -> ServiceResult<u64> {
        let deleted = self
            .ctx
            .refresh_token_repo()
            .delete_expired(Utc::now())
            .await?;

        if deleted > 0 {
            info!(deleted, "Swept expired refresh tokens");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceError;
    use crate::testing::{test_context, InMemoryStore};

    fn user(store: &InMemoryStore, name: &str) -> UserId {
        store.insert_user(name, "hash").id
    }

    #[tokio::test]
    async fn test_issue_stores_only_the_hash() {
        let (ctx, store) = test_context();
        let user_id = user(&store, "alice");

        let pair = SessionManager::new(&ctx).issue(user_id, "alice").await.unwrap();

        let hashes = store.refresh_token_hashes();
        assert_eq!(hashes, vec![hash_refresh_token(&pair.refresh_token)]);
        assert!(!hashes.contains(&pair.refresh_token));
        assert!(pair.refresh_expires_at > Utc::now() + Duration::days(6));
    }

    #[tokio::test]
    async fn test_access_token_round_trip() {
        let (ctx, store) = test_context();
        let user_id = user(&store, "alice");
        let sessions = SessionManager::new(&ctx);

        let pair = sessions.issue(user_id, "alice").await.unwrap();
        let claims = sessions.validate_access(&pair.access.token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.username, "alice");
    }

    #[tokio::test]
    async fn test_refresh_mints_access_without_rotating() {
        let (ctx, store) = test_context();
        let user_id = user(&store, "bob");
        let sessions = SessionManager::new(&ctx);
        let pair = sessions.issue(user_id, "bob").await.unwrap();

        let refreshed = sessions.refresh(&pair.refresh_token).await.unwrap();
        assert_eq!(refreshed.user_id, user_id);
        assert_eq!(refreshed.username, "bob");

        // The same refresh token keeps working
        assert_eq!(
            sessions.validate_refresh(&pair.refresh_token).await.unwrap(),
            user_id
        );
    }

    #[tokio::test]
    async fn test_revoked_token_cannot_refresh() {
        let (ctx, store) = test_context();
        let user_id = user(&store, "carol");
        let sessions = SessionManager::new(&ctx);
        let pair = sessions.issue(user_id, "carol").await.unwrap();

        assert!(sessions.revoke(&pair.refresh_token).await.unwrap());
        assert!(!sessions.revoke(&pair.refresh_token).await.unwrap());

        let result = sessions.refresh(&pair.refresh_token).await;
        assert!(matches!(
            result,
            Err(ServiceError::App(AppError::InvalidRefreshToken))
        ));
    }

    #[tokio::test]
    async fn test_unknown_and_empty_tokens() {
        let (ctx, _store) = test_context();
        let sessions = SessionManager::new(&ctx);

        assert!(!sessions.revoke("never-issued").await.unwrap());
        assert!(!sessions.revoke("").await.unwrap());
        assert!(sessions.validate_refresh("").await.is_err());
        assert!(sessions.validate_refresh("never-issued").await.is_err());
    }

    #[tokio::test]
    async fn test_expired_refresh_token_is_rejected_and_swept() {
        let (ctx, store) = test_context();
        let user_id = user(&store, "dave");
        let sessions = SessionManager::new(&ctx);
        let pair = sessions.issue(user_id, "dave").await.unwrap();

        store.expire_refresh_tokens(Utc::now() - Duration::seconds(1));

        assert!(sessions.validate_refresh(&pair.refresh_token).await.is_err());
        assert_eq!(sessions.sweep_expired().await.unwrap(), 1);
        assert!(store.refresh_token_hashes().is_empty());
    }

    #[tokio::test]
    async fn test_revoke_all_for_user() {
        let (ctx, store) = test_context();
        let alice = user(&store, "alice");
        let bob = user(&store, "bob");
        let sessions = SessionManager::new(&ctx);

        let first = sessions.issue(alice, "alice").await.unwrap();
        sessions.issue(alice, "alice").await.unwrap();
        let other = sessions.issue(bob, "bob").await.unwrap();

        assert_eq!(sessions.revoke_all_for_user(alice).await.unwrap(), 2);
        assert!(sessions.validate_refresh(&first.refresh_token).await.is_err());
        assert!(sessions.validate_refresh(&other.refresh_token).await.is_ok());
    }
}
