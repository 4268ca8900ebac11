//! Test fixtures and data generators
//!
//! Request bodies and the response shapes the tests read back.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id of the seeded "Wood" resource
pub const WOOD: i64 = 1;

/// Username that will not collide with earlier runs against the same database
pub fn unique_username() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("t_{}", &id[..16])
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        Self {
            username: unique_username(),
            password: "TestPass123!".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            username: reg.username.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Company creation request
#[derive(Debug, Serialize)]
pub struct CreateCompanyRequest {
    pub name: String,
}

impl CreateCompanyRequest {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Market buy or sell request
#[derive(Debug, Serialize)]
pub struct TradeRequest {
    pub resource_id: i64,
    pub pack_count: i64,
}

impl TradeRequest {
    pub fn packs(resource_id: i64, pack_count: i64) -> Self {
        Self {
            resource_id,
            pack_count,
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserSummary,
}

#[derive(Debug, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
}

/// Company response
#[derive(Debug, Deserialize)]
pub struct CompanyResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub money: i64,
}

/// Catalog resource
#[derive(Debug, Deserialize)]
pub struct ResourceResponse {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub pack_size: i64,
}

/// Inventory row
#[derive(Debug, Deserialize)]
pub struct InventoryItemResponse {
    pub resource_id: i64,
    pub name: String,
    pub quantity: i64,
}

/// Production building with nested processes
#[derive(Debug, Deserialize)]
pub struct ProductionBuildingResponse {
    pub id: i64,
    pub name: String,
    pub processes: Vec<ProductionProcessResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ProductionProcessResponse {
    pub id: i64,
    pub name: String,
    pub resources: Vec<ProcessResourceResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ProcessResourceResponse {
    pub resource_id: i64,
    pub resource_name: String,
    pub direction: String,
    pub quantity: i64,
}

/// Success message
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
