//! JWT utilities for access tokens
//!
//! Access tokens are stateless HS256 assertions. They are validated by
//! signature and expiry only and never looked up in a store.

use boss_core::UserId;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Token type marker carried in the claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Username at the time the token was minted
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    pub token_type: TokenType,
}

impl Claims {
    /// Get the user ID
    ///
    /// # Errors
    /// Returns an error if the subject is not a number
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.sub
            .parse::<i64>()
            .map(UserId::new)
            .map_err(|_| AppError::InvalidToken)
    }

    /// Expiry is exclusive: at `exp` the token is already dead
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// A freshly minted access token
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
}

/// JWT service for encoding and decoding access tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and access lifetime in seconds
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
        }
    }

    /// Access token lifetime in seconds
    #[must_use]
    pub fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    /// Mint an access token valid from now
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access_token(
        &self,
        user_id: UserId,
        username: &str,
    ) -> Result<AccessToken, AppError> {
        self.issue_access_token_at(user_id, username, Utc::now())
    }

    /// Mint an access token as if issued at `issued_at`
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access_token_at(
        &self,
        user_id: UserId,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<AccessToken, AppError> {
        let expires_at = issued_at + Duration::seconds(self.access_token_expiry);
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            token_type: TokenType::Access,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))?;

        Ok(AccessToken {
            token,
            expires_in: self.access_token_expiry,
            expires_at,
        })
    }

    /// Validate an access token against the current time
    ///
    /// # Errors
    /// `TokenExpired` once the lifetime has elapsed, `InvalidToken` otherwise
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.validate_access_token_at(token, Utc::now())
    }

    /// Validate an access token against an explicit clock reading
    ///
    /// # Errors
    /// `TokenExpired` once `now >= exp`, `InvalidToken` for any other failure
    pub fn validate_access_token_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Claims, AppError> {
        // Expiry is checked below with an exclusive boundary and no leeway
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AppError::InvalidToken)?
            .claims;

        if claims.token_type != TokenType::Access {
            return Err(AppError::InvalidToken);
        }
        if claims.is_expired_at(now) {
            return Err(AppError::TokenExpired);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test-secret-key-that-is-long-enough", 900)
    }

    #[test]
    fn test_issue_and_validate() {
        let service = create_test_service();
        let access = service.issue_access_token(UserId::new(42), "alice").unwrap();

        assert_eq!(access.expires_in, 900);

        let claims = service.validate_access_token(&access.token).unwrap();
        assert_eq!(claims.user_id().unwrap(), UserId::new(42));
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_expires_after_lifetime() {
        let service = create_test_service();
        let issued = Utc::now();
        let access = service
            .issue_access_token_at(UserId::new(1), "bob", issued)
            .unwrap();

        let just_before = issued + Duration::seconds(899);
        assert!(service
            .validate_access_token_at(&access.token, just_before)
            .is_ok());

        let after = issued + Duration::seconds(901);
        assert!(matches!(
            service.validate_access_token_at(&access.token, after),
            Err(AppError::TokenExpired)
        ));
    }

    #[test]
    fn test_expiry_instant_is_expired() {
        let service = create_test_service();
        let issued = Utc::now();
        let access = service
            .issue_access_token_at(UserId::new(1), "bob", issued)
            .unwrap();

        let exactly = DateTime::from_timestamp(access.expires_at.timestamp(), 0).unwrap();
        assert!(matches!(
            service.validate_access_token_at(&access.token, exactly),
            Err(AppError::TokenExpired)
        ));
    }

    #[test]
    fn test_token_from_the_past_is_expired_now() {
        let service = create_test_service();
        let access = service
            .issue_access_token_at(UserId::new(7), "carol", Utc::now() - Duration::hours(1))
            .unwrap();

        assert!(matches!(
            service.validate_access_token(&access.token),
            Err(AppError::TokenExpired)
        ));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let service = create_test_service();
        let other = JwtService::new("a-completely-different-secret-value", 900);
        let access = other.issue_access_token(UserId::new(1), "mallory").unwrap();

        assert!(matches!(
            service.validate_access_token(&access.token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_invalid_token() {
        let service = create_test_service();

        let result = service.validate_access_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_claims_user_id() {
        let claims = Claims {
            sub: "12345".to_string(),
            username: "dave".to_string(),
            iat: 0,
            exp: i64::MAX,
            token_type: TokenType::Access,
        };

        assert_eq!(claims.user_id().unwrap(), UserId::new(12345));

        let bad = Claims {
            sub: "not-a-number".to_string(),
            ..claims
        };
        assert!(matches!(bad.user_id(), Err(AppError::InvalidToken)));
    }
}
