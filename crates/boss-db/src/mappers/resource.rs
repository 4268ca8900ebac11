//! Resource and inventory model -> entity mappers

use boss_core::entities::{InventoryItemDetails, Resource};
use boss_core::value_objects::{Money, ResourceId};

use crate::models::{InventoryDetailsModel, ResourceModel};

impl From<ResourceModel> for Resource {
    fn from(model: ResourceModel) -> Self {
        Resource {
            id: ResourceId::new(model.id),
            name: model.name,
            icon: model.icon,
            description: model.description,
            price: Money::from_thousandths(model.price),
            pack_size: model.pack_size,
            created_at: model.created_at,
        }
    }
}

impl From<InventoryDetailsModel> for InventoryItemDetails {
    fn from(model: InventoryDetailsModel) -> Self {
        InventoryItemDetails {
            id: model.id,
            resource_id: ResourceId::new(model.resource_id),
            name: model.name,
            icon: model.icon,
            quantity: model.quantity,
            price: Money::from_thousandths(model.price),
            pack_size: model.pack_size,
        }
    }
}
