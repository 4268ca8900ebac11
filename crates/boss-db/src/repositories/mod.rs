//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in boss-core.
//! Each repository handles database operations for a specific domain entity.

mod company;
mod error;
mod inventory;
mod production;
mod refresh_token;
mod resource;
mod user;

pub use company::PgCompanyRepository;
pub use inventory::PgInventoryRepository;
pub use production::{
    PgProcessResourceRepository, PgProductionBuildingRepository, PgProductionProcessRepository,
};
pub use refresh_token::PgRefreshTokenRepository;
pub use resource::PgResourceRepository;
pub use user::PgUserRepository;
