//! # boss-core
//!
//! Domain layer containing entities, value objects and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Company, FlowDirection, InventoryItemDetails, NewCompany, NewUser,
    ProcessResource, ProductionBuilding, ProductionProcess, RefreshToken, Resource, TimeWindow,
    User,
};
pub use error::DomainError;
pub use traits::{
    CompanyRepository, InventoryRepository, ProcessResourceRepository,
    ProductionBuildingRepository, ProductionProcessRepository, RefreshTokenRepository,
    RepoResult, ResourceRepository, UpsertOutcome, UserRepository,
};
pub use value_objects::{
    BuildingId, CompanyId, Money, ProcessId, ResourceId, UserId,
};
