//! User entity - represents a registered player account

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// Minimum accepted password length (a floor, not a policy recommendation)
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to insert a user; the store assigns the id and timestamps
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

impl User {
    /// Check a plaintext password against the minimum length floor
    pub fn password_meets_minimum(password: &str) -> bool {
        password.chars().count() >= MIN_PASSWORD_LENGTH
    }
}
