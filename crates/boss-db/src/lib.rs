//! # boss-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `boss-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model -> entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use boss_db::pool::{create_pool, default_migrations_dir, run_migrations, DatabaseConfig};
//! use boss_db::repositories::PgCompanyRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool, &default_migrations_dir()).await?;
//!     let companies = PgCompanyRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{
    create_pool, create_pool_from_env, default_migrations_dir, run_migrations, DatabaseConfig,
    MigrationError, PgPool,
};
pub use repositories::{
    PgCompanyRepository, PgInventoryRepository, PgProcessResourceRepository,
    PgProductionBuildingRepository, PgProductionProcessRepository, PgRefreshTokenRepository,
    PgResourceRepository, PgUserRepository,
};
