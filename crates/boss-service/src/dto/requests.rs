//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Game rules (password floor, company name length, pack counts) are checked
//! by the services so that they surface their own error codes.

use serde::Deserialize;
use validator::{Validate, ValidationError};

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 32, message = "Username must be 3-32 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,

    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Usernames are ASCII letters, digits and underscores
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Ok(())
    } else {
        Err(ValidationError::new("username_charset")
            .with_message("Username may only contain letters, digits and underscores".into()))
    }
}

// ============================================================================
// Company Requests
// ============================================================================

/// Found a company for the current user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(length(max = 200, message = "Company name is too long"))]
    pub name: String,
}

// ============================================================================
// Market Requests
// ============================================================================

/// Buy or sell a number of packs of one resource
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct TradeRequest {
    #[validate(range(min = 1, message = "resource_id must be positive"))]
    pub resource_id: i64,

    pub pack_count: i64,
}
