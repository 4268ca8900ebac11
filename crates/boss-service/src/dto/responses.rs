//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Money values are serialized as integer thousandths.

use chrono::{DateTime, Utc};
use serde::Serialize;

use boss_core::Money;

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Public view of an account
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
}

/// Body of register, login and me responses. Tokens travel in cookies.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserSummary,
}

// ============================================================================
// Company Responses
// ============================================================================

/// Company with its balance
#[derive(Debug, Clone, Serialize)]
pub struct CompanyResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub money: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Catalog Responses
// ============================================================================

/// Catalog resource; price is per pack
#[derive(Debug, Clone, Serialize)]
pub struct ResourceResponse {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub price: Money,
    pub pack_size: i64,
}

/// Held units of one resource
#[derive(Debug, Clone, Serialize)]
pub struct InventoryItemResponse {
    pub id: i64,
    pub resource_id: i64,
    pub name: String,
    pub icon: String,
    pub quantity: i64,
    pub price: Money,
    pub pack_size: i64,
}

/// Building with its processes
#[derive(Debug, Clone, Serialize)]
pub struct ProductionBuildingResponse {
    pub id: i64,
    pub name: String,
    pub cost: Money,
    pub processes: Vec<ProductionProcessResponse>,
}

/// Process with its resource flows
#[derive(Debug, Clone, Serialize)]
pub struct ProductionProcessResponse {
    pub id: i64,
    pub name: String,
    pub processing_time_ms: i64,
    pub window_start_hour: Option<i16>,
    pub window_end_hour: Option<i16>,
    pub resources: Vec<ProcessResourceResponse>,
}

/// One input or output of a process
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResourceResponse {
    pub resource_id: i64,
    pub resource_name: String,
    pub direction: String,
    pub quantity: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_money_serializes_as_thousandths() {
        let now = Utc::now();
        let company = CompanyResponse {
            id: 1,
            user_id: 2,
            name: "Acme".to_string(),
            money: Money::from_thousandths(50_000_000),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&company).unwrap();
        assert_eq!(json["money"], 50_000_000);
        assert_eq!(json["name"], "Acme");
    }

    #[test]
    fn test_auth_response_shape() {
        let response = AuthResponse {
            user: UserSummary {
                id: 7,
                username: "tycoon".to_string(),
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({"user": {"id": 7, "username": "tycoon"}}));
    }

    #[test]
    fn test_process_without_window_serializes_nulls() {
        let process = ProductionProcessResponse {
            id: 1,
            name: "Chop".to_string(),
            processing_time_ms: 1000,
            window_start_hour: None,
            window_end_hour: None,
            resources: Vec::new(),
        };
        let json = serde_json::to_value(&process).unwrap();
        assert!(json["window_start_hour"].is_null());
        assert!(json["window_end_hour"].is_null());
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        assert!(ReadinessResponse::ready(true).is_ready());
        let down = ReadinessResponse::ready(false);
        assert!(!down.is_ready());
        assert_eq!(down.checks.database, "unhealthy");
    }
}
