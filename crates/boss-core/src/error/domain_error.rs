//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{BuildingId, CompanyId, ProcessId, ResourceId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Company not found: {0}")]
    CompanyNotFound(CompanyId),

    #[error("User {0} has no company")]
    NoCompanyForUser(UserId),

    #[error("Resource not found: {0}")]
    ResourceNotFound(ResourceId),

    #[error("Production building not found: {0}")]
    BuildingNotFound(BuildingId),

    #[error("Production process not found: {0}")]
    ProcessNotFound(ProcessId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Pack count must be positive, got {0}")]
    InvalidPackCount(i64),

    #[error("Quantity must not be negative, got {0}")]
    InvalidQuantity(i64),

    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("Company name must be between {min} and {max} characters")]
    InvalidCompanyName { min: usize, max: usize },

    #[error("Invalid time window: {start}..{end}")]
    InvalidTimeWindow { start: i64, end: i64 },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already taken")]
    UserAlreadyExists,

    #[error("User already has a company")]
    CompanyAlreadyExists,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Insufficient stock")]
    InsufficientStock,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Operation timed out: {0}")]
    Timeout(&'static str),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::CompanyNotFound(_) | Self::NoCompanyForUser(_) => "UNKNOWN_COMPANY",
            Self::ResourceNotFound(_) => "UNKNOWN_RESOURCE",
            Self::BuildingNotFound(_) => "UNKNOWN_BUILDING",
            Self::ProcessNotFound(_) => "UNKNOWN_PROCESS",

            // Validation
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InvalidPackCount(_) => "INVALID_PACK_COUNT",
            Self::InvalidQuantity(_) => "INVALID_QUANTITY",
            Self::WeakPassword { .. } => "WEAK_PASSWORD",
            Self::InvalidCompanyName { .. } => "INVALID_COMPANY_NAME",
            Self::InvalidTimeWindow { .. } => "INVALID_TIME_WINDOW",

            // Conflict
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::CompanyAlreadyExists => "COMPANY_ALREADY_EXISTS",

            // Business Rules
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::InsufficientStock => "INSUFFICIENT_STOCK",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::Timeout(_) => "TIMEOUT",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::CompanyNotFound(_)
                | Self::NoCompanyForUser(_)
                | Self::ResourceNotFound(_)
                | Self::BuildingNotFound(_)
                | Self::ProcessNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::InvalidAmount
                | Self::InvalidPackCount(_)
                | Self::InvalidQuantity(_)
                | Self::WeakPassword { .. }
                | Self::InvalidCompanyName { .. }
                | Self::InvalidTimeWindow { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::UserAlreadyExists | Self::CompanyAlreadyExists)
    }

    /// Check if this is a rejected trade (client error, not a fault)
    pub fn is_business_rule(&self) -> bool {
        matches!(self, Self::InsufficientFunds | Self::InsufficientStock)
    }

    /// Check if this is a deadline failure
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
