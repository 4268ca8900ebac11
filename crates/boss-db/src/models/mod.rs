//! Database models - SQLx-compatible structs for PostgreSQL tables

mod company;
mod inventory;
mod production;
mod refresh_token;
mod resource;
mod user;

pub use company::CompanyModel;
pub use inventory::InventoryDetailsModel;
pub use production::{ProcessResourceModel, ProductionBuildingModel, ProductionProcessModel};
pub use refresh_token::RefreshTokenModel;
pub use resource::ResourceModel;
pub use user::UserModel;
