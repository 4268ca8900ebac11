//! Inventory database model

use sqlx::FromRow;

/// company_inventory row joined with its resource
#[derive(Debug, Clone, FromRow)]
pub struct InventoryDetailsModel {
    pub id: i64,
    pub resource_id: i64,
    pub name: String,
    pub icon: String,
    pub quantity: i64,
    pub price: i64,
    pub pack_size: i64,
}
