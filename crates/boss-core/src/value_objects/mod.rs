//! Value objects - immutable types that represent domain concepts

mod ids;
mod money;

pub use ids::{BuildingId, CompanyId, ProcessId, ResourceId, UserId};
pub use money::Money;
