//! Authentication utilities

mod jwt;
mod password;
mod refresh;

pub use jwt::{AccessToken, Claims, JwtService, TokenType};
pub use password::{
    hash_password, validate_password_strength, verify_dummy_password, verify_password,
};
pub use refresh::{generate_refresh_token, hash_refresh_token, REFRESH_TOKEN_BYTES};
