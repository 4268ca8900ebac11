//! Refresh token entity - a stored, revocable session credential

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// Persisted refresh token. Only the one-way hash of the raw token is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub id: i64,
    pub user_id: UserId,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    #[inline]
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Expiry is exclusive: a token is dead at `expires_at`
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Usable iff `now < expires_at` and not revoked
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && !self.is_expired_at(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(expires_at: DateTime<Utc>) -> RefreshToken {
        RefreshToken {
            id: 1,
            user_id: UserId::new(1),
            token_hash: "abc".to_string(),
            expires_at,
            revoked_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_usable_before_expiry() {
        let now = Utc::now();
        assert!(token(now + Duration::seconds(1)).is_usable_at(now));
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let now = Utc::now();
        assert!(!token(now).is_usable_at(now));
    }

    #[test]
    fn test_revoked_is_not_usable() {
        let now = Utc::now();
        let mut t = token(now + Duration::days(7));
        t.revoked_at = Some(now);
        assert!(!t.is_usable_at(now));
    }
}
