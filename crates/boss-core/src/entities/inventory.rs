//! Inventory entities - units of a resource held by a company
//!
//! Stock is counted in units, never in packs, and is never negative.

use crate::value_objects::{Money, ResourceId};

/// Inventory row joined with its resource, as shown to the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItemDetails {
    pub id: i64,
    pub resource_id: ResourceId,
    pub name: String,
    pub icon: String,
    pub quantity: i64,
    pub price: Money,
    pub pack_size: i64,
}
