//! Business logic services
//!
//! Each service borrows the shared `ServiceContext` and is cheap to build per
//! request.

pub mod auth;
pub mod catalog;
pub mod company;
pub mod context;
pub mod error;
pub mod inventory;
pub mod ledger;
pub mod market;
pub mod seed;
pub mod session;

// Re-export all services for convenience
pub use auth::{AuthResult, AuthService};
pub use catalog::CatalogService;
pub use company::CompanyService;
pub use context::{
    ServiceContext, ServiceContextBuilder, DEFAULT_REFRESH_TOKEN_EXPIRY, DEFAULT_REQUEST_TIMEOUT,
};
pub use error::{ServiceError, ServiceResult};
pub use inventory::InventoryService;
pub use ledger::LedgerService;
pub use market::{MarketService, TradeReceipt, COMPENSATION_GRACE};
pub use seed::{ProductionSeedCounts, SeedCounts, SeedError, SeedReport, SeedService};
pub use session::{RefreshedSession, SessionManager, TokenPair};
