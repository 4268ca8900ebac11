//! Service layer error types

use boss_common::{domain_status, AppError};
use boss_core::DomainError;
use thiserror::Error;

/// Failure of a service operation
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Game rule or storage failure from the domain
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Authentication failure
    #[error(transparent)]
    App(#[from] AppError),

    /// Misconfigured service wiring
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unexpected failure such as a hashing error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The domain error behind this failure, if any
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) | Self::App(AppError::Domain(e)) => Some(e),
            _ => None,
        }
    }

    /// HTTP status for this failure
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::App(e) => e.status_code(),
            Self::Validation(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
