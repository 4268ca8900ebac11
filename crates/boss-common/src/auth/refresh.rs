//! Opaque refresh token generation and hashing
//!
//! The raw token is handed to the client once; only its SHA-256 digest is stored.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Entropy of a refresh token in bytes (256 bits)
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate a new random refresh token, base64url encoded
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hex SHA-256 digest of a raw refresh token
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
