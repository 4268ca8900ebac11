//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CreateCompanyRequest, LoginRequest, RegisterRequest, TradeRequest};

pub use responses::{
    AuthResponse, CompanyResponse, HealthChecks, HealthResponse, InventoryItemResponse,
    MessageResponse, ProcessResourceResponse, ProductionBuildingResponse,
    ProductionProcessResponse, ReadinessResponse, ResourceResponse, UserSummary,
};
