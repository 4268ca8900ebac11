//! Domain entities - core business objects

mod company;
mod inventory;
mod production;
mod refresh_token;
mod resource;
mod user;

pub use company::{Company, NewCompany};
pub use inventory::InventoryItemDetails;
pub use production::{
    FlowDirection, ProcessResource, ProductionBuilding, ProductionProcess, TimeWindow,
};
pub use refresh_token::RefreshToken;
pub use resource::Resource;
pub use user::{NewUser, User, MIN_PASSWORD_LENGTH};
