//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use boss_core::entities::{Company, InventoryItemDetails, Resource, User};

use super::responses::{
    AuthResponse, CompanyResponse, InventoryItemResponse, ResourceResponse, UserSummary,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into_inner(),
            username: user.username.clone(),
        }
    }
}

impl From<&User> for AuthResponse {
    fn from(user: &User) -> Self {
        Self {
            user: UserSummary::from(user),
        }
    }
}

// ============================================================================
// Company Mappers
// ============================================================================

impl From<&Company> for CompanyResponse {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id.into_inner(),
            user_id: company.user_id.into_inner(),
            name: company.name.clone(),
            money: company.money,
            created_at: company.created_at,
            updated_at: company.updated_at,
        }
    }
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self::from(&company)
    }
}

// ============================================================================
// Catalog Mappers
// ============================================================================

impl From<Resource> for ResourceResponse {
    fn from(resource: Resource) -> Self {
        Self {
            id: resource.id.into_inner(),
            name: resource.name,
            icon: resource.icon,
            description: resource.description,
            price: resource.price,
            pack_size: resource.pack_size,
        }
    }
}

impl From<InventoryItemDetails> for InventoryItemResponse {
    fn from(item: InventoryItemDetails) -> Self {
        Self {
            id: item.id,
            resource_id: item.resource_id.into_inner(),
            name: item.name,
            icon: item.icon,
            quantity: item.quantity,
            price: item.price,
            pack_size: item.pack_size,
        }
    }
}
