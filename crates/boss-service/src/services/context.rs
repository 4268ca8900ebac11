//! Service context - dependency container for services
//!
//! Holds all repositories and other dependencies needed by services.

use std::sync::Arc;
use std::time::Duration;

use boss_common::auth::JwtService;
use boss_core::traits::{
    CompanyRepository, InventoryRepository, ProcessResourceRepository,
    ProductionBuildingRepository, ProductionProcessRepository, RefreshTokenRepository,
    ResourceRepository, UserRepository,
};
use boss_core::Money;
use boss_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Refresh token lifetime used when none is configured (7 days)
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 7 * 24 * 60 * 60;

/// Request deadline used when none is configured
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories for every store
/// - JWT service for access tokens
/// - Game and session settings
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool, absent when running on in-memory stores
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    company_repo: Arc<dyn CompanyRepository>,
    resource_repo: Arc<dyn ResourceRepository>,
    inventory_repo: Arc<dyn InventoryRepository>,
    building_repo: Arc<dyn ProductionBuildingRepository>,
    process_repo: Arc<dyn ProductionProcessRepository>,
    process_resource_repo: Arc<dyn ProcessResourceRepository>,

    // Services
    jwt_service: Arc<JwtService>,

    // Settings
    refresh_token_expiry: i64,
    initial_company_money: Money,
    request_timeout: Duration,
}

impl ServiceContext {
    /// Create a builder for the context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if the stores are backed by one
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Whether the backing store is reachable. In-memory stores always are.
    pub async fn database_healthy(&self) -> bool {
        match &self.pool {
            Some(pool) => pool.acquire().await.is_ok(),
            None => true,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the refresh token repository
    pub fn refresh_token_repo(&self) -> &dyn RefreshTokenRepository {
        self.refresh_token_repo.as_ref()
    }

    /// Get the company repository
    pub fn company_repo(&self) -> &dyn CompanyRepository {
        self.company_repo.as_ref()
    }

    /// Get the resource repository
    pub fn resource_repo(&self) -> &dyn ResourceRepository {
        self.resource_repo.as_ref()
    }

    /// Get the inventory repository
    pub fn inventory_repo(&self) -> &dyn InventoryRepository {
        self.inventory_repo.as_ref()
    }

    /// Get the production building repository
    pub fn building_repo(&self) -> &dyn ProductionBuildingRepository {
        self.building_repo.as_ref()
    }

    /// Get the production process repository
    pub fn process_repo(&self) -> &dyn ProductionProcessRepository {
        self.process_repo.as_ref()
    }

    /// Get the process resource flow repository
    pub fn process_resource_repo(&self) -> &dyn ProcessResourceRepository {
        self.process_resource_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    // === Settings ===

    /// Refresh token lifetime in seconds
    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }

    /// Balance a newly founded company starts with
    pub fn initial_company_money(&self) -> Money {
        self.initial_company_money
    }

    /// Deadline budget for one request
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .field("initial_company_money", &self.initial_company_money)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    refresh_token_repo: Option<Arc<dyn RefreshTokenRepository>>,
    company_repo: Option<Arc<dyn CompanyRepository>>,
    resource_repo: Option<Arc<dyn ResourceRepository>>,
    inventory_repo: Option<Arc<dyn InventoryRepository>>,
    building_repo: Option<Arc<dyn ProductionBuildingRepository>>,
    process_repo: Option<Arc<dyn ProductionProcessRepository>>,
    process_resource_repo: Option<Arc<dyn ProcessResourceRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    refresh_token_expiry: i64,
    initial_company_money: Money,
    request_timeout: Duration,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            user_repo: None,
            refresh_token_repo: None,
            company_repo: None,
            resource_repo: None,
            inventory_repo: None,
            building_repo: None,
            process_repo: None,
            process_resource_repo: None,
            jwt_service: None,
            refresh_token_expiry: DEFAULT_REFRESH_TOKEN_EXPIRY,
            initial_company_money: Money::ZERO,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn refresh_token_repo(mut self, repo: Arc<dyn RefreshTokenRepository>) -> Self {
        self.refresh_token_repo = Some(repo);
        self
    }

    pub fn company_repo(mut self, repo: Arc<dyn CompanyRepository>) -> Self {
        self.company_repo = Some(repo);
        self
    }

    pub fn resource_repo(mut self, repo: Arc<dyn ResourceRepository>) -> Self {
        self.resource_repo = Some(repo);
        self
    }

    pub fn inventory_repo(mut self, repo: Arc<dyn InventoryRepository>) -> Self {
        self.inventory_repo = Some(repo);
        self
    }

    pub fn building_repo(mut self, repo: Arc<dyn ProductionBuildingRepository>) -> Self {
        self.building_repo = Some(repo);
        self
    }

    pub fn process_repo(mut self, repo: Arc<dyn ProductionProcessRepository>) -> Self {
        self.process_repo = Some(repo);
        self
    }

    pub fn process_resource_repo(mut self, repo: Arc<dyn ProcessResourceRepository>) -> Self {
        self.process_resource_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn refresh_token_expiry(mut self, seconds: i64) -> Self {
        self.refresh_token_expiry = seconds;
        self
    }

    pub fn initial_company_money(mut self, money: Money) -> Self {
        self.initial_company_money = money;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        if self.refresh_token_expiry <= 0 {
            return Err(ServiceError::validation(
                "refresh_token_expiry must be positive",
            ));
        }
        if self.initial_company_money.is_negative() {
            return Err(ServiceError::validation(
                "initial_company_money must not be negative",
            ));
        }

        Ok(ServiceContext {
            pool: self.pool,
            user_repo: required(self.user_repo, "user_repo")?,
            refresh_token_repo: required(self.refresh_token_repo, "refresh_token_repo")?,
            company_repo: required(self.company_repo, "company_repo")?,
            resource_repo: required(self.resource_repo, "resource_repo")?,
            inventory_repo: required(self.inventory_repo, "inventory_repo")?,
            building_repo: required(self.building_repo, "building_repo")?,
            process_repo: required(self.process_repo, "process_repo")?,
            process_resource_repo: required(self.process_resource_repo, "process_resource_repo")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            refresh_token_expiry: self.refresh_token_expiry,
            initial_company_money: self.initial_company_money,
            request_timeout: self.request_timeout,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
    value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
}
