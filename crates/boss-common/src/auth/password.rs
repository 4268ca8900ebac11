//! Password hashing and verification
//!
//! Argon2id with a random salt per hash; digests are stored in PHC string format.

use std::sync::LazyLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use boss_core::entities::{User, MIN_PASSWORD_LENGTH};
use boss_core::DomainError;

use crate::error::AppError;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a hash
///
/// # Errors
/// Returns an error if verification fails or the hash is invalid
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Plaintext behind [`DUMMY_PASSWORD_HASH`]. Never accepted.
const DUMMY_PASSWORD: &str = "no-such-user-placeholder";

/// Fixed digest verified when a login names an unknown user, keeping both
/// failure paths at one Argon2 verification each
static DUMMY_PASSWORD_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password(DUMMY_PASSWORD).ok());

/// Run a full verification against the dummy digest. Always `false`.
pub fn verify_dummy_password(password: &str) -> bool {
    if let Some(hash) = DUMMY_PASSWORD_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
    false
}

/// Validate the password length floor
///
/// Only a minimum length of [`MIN_PASSWORD_LENGTH`] characters is enforced.
///
/// # Errors
/// Returns `DomainError::WeakPassword` if the password is too short
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    if User::password_meets_minimum(password) {
        Ok(())
    } else {
        Err(AppError::Domain(DomainError::WeakPassword {
            min: MIN_PASSWORD_LENGTH,
        }))
    }
}
