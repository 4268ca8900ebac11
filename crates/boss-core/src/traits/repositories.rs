//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Mutating operations that guard an invariant
//! (solvency, non-negative stock) must be atomic per row in the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Company, InventoryItemDetails, NewCompany, NewUser, ProcessResource, ProductionBuilding,
    ProductionProcess, RefreshToken, Resource, User,
};
use crate::error::DomainError;
use crate::value_objects::{CompanyId, Money, ProcessId, ResourceId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Whether an upsert inserted a new row or overwrote an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by exact username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Create a new user. A taken username yields `UserAlreadyExists`.
    async fn create(&self, user: NewUser) -> RepoResult<User>;
}

// ============================================================================
// Refresh Token Repository
// ============================================================================

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Persist the hash of a freshly issued refresh token
    async fn create(
        &self,
        user_id: UserId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<RefreshToken>;

    /// Find a token that is neither revoked nor expired at `now`
    async fn find_valid(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<RefreshToken>>;

    /// Mark a live token revoked. Returns false when nothing matched.
    async fn revoke(&self, token_hash: &str, now: DateTime<Utc>) -> RepoResult<bool>;

    /// Revoke every live token of a user, returning how many were revoked
    async fn revoke_all_for_user(&self, user_id: UserId, now: DateTime<Utc>) -> RepoResult<u64>;

    /// Delete tokens whose expiry is at or before `now`
    async fn delete_expired(&self, now: DateTime<Utc>) -> RepoResult<u64>;
}

// ============================================================================
// Company Repository (ledger storage)
// ============================================================================

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Find company by ID
    async fn find_by_id(&self, id: CompanyId) -> RepoResult<Option<Company>>;

    /// Find the company owned by a user
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Option<Company>>;

    /// Create a company. A second company for the same user yields
    /// `CompanyAlreadyExists`.
    async fn create(&self, company: NewCompany) -> RepoResult<Company>;

    /// Add `amount` to the balance, returning the new balance
    async fn credit(&self, id: CompanyId, amount: Money) -> RepoResult<Money>;

    /// Subtract `amount` if the balance covers it, returning the new balance.
    /// Fails with `InsufficientFunds` otherwise and leaves the row untouched.
    async fn debit(&self, id: CompanyId, amount: Money) -> RepoResult<Money>;
}

// ============================================================================
// Resource Repository
// ============================================================================

#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Find resource by ID
    async fn find_by_id(&self, id: ResourceId) -> RepoResult<Option<Resource>>;

    /// List the whole catalog ordered by id
    async fn list_all(&self) -> RepoResult<Vec<Resource>>;

    /// Insert or overwrite a catalog entry by id
    async fn upsert(&self, resource: &Resource) -> RepoResult<UpsertOutcome>;
}

// ============================================================================
// Inventory Repository
// ============================================================================

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Current units held, `None` when no row exists yet
    async fn quantity(&self, company_id: CompanyId, resource_id: ResourceId)
        -> RepoResult<Option<i64>>;

    /// Inventory rows joined with resource details, ordered by resource name
    async fn list_with_details(&self, company_id: CompanyId)
        -> RepoResult<Vec<InventoryItemDetails>>;

    /// Increment units, creating the row on first acquisition. Returns the new quantity.
    async fn add_units(
        &self,
        company_id: CompanyId,
        resource_id: ResourceId,
        units: i64,
    ) -> RepoResult<i64>;

    /// Decrement units if enough are held. Fails with `InsufficientStock` when
    /// the row is missing or holds fewer than `units`. Returns the new quantity.
    async fn remove_units(
        &self,
        company_id: CompanyId,
        resource_id: ResourceId,
        units: i64,
    ) -> RepoResult<i64>;

    /// Overwrite the quantity, creating the row if needed
    async fn set_units(
        &self,
        company_id: CompanyId,
        resource_id: ResourceId,
        units: i64,
    ) -> RepoResult<()>;
}

// ============================================================================
// Production Catalog Repositories
// ============================================================================

#[async_trait]
pub trait ProductionBuildingRepository: Send + Sync {
    /// List all buildings ordered by id
    async fn list_all(&self) -> RepoResult<Vec<ProductionBuilding>>;

    /// Insert or overwrite a building by id
    async fn upsert(&self, building: &ProductionBuilding) -> RepoResult<UpsertOutcome>;
}

#[async_trait]
pub trait ProductionProcessRepository: Send + Sync {
    /// List all processes ordered by id
    async fn list_all(&self) -> RepoResult<Vec<ProductionProcess>>;

    /// Insert or overwrite a process by id
    async fn upsert(&self, process: &ProductionProcess) -> RepoResult<UpsertOutcome>;
}

#[async_trait]
pub trait ProcessResourceRepository: Send + Sync {
    /// All flows of every process
    async fn list_all(&self) -> RepoResult<Vec<ProcessResource>>;

    /// Flows of one process
    async fn list_by_process(&self, process_id: ProcessId) -> RepoResult<Vec<ProcessResource>>;

    /// Insert or update the quantity on (process, resource, direction)
    async fn upsert(&self, flow: &ProcessResource) -> RepoResult<UpsertOutcome>;

    /// Remove one flow row
    async fn delete(&self, flow: &ProcessResource) -> RepoResult<()>;
}
