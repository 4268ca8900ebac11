//! In-memory repository fakes
//!
//! `InMemoryStore` implements every repository trait over a single mutex so
//! services can be exercised without Postgres. It enforces the same rules the
//! SQL statements do: unique usernames, one company per user, no overdraft and
//! no negative stock. Inventory writes can be made to fail or stall to drive
//! the market engine's compensation paths.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use boss_common::auth::JwtService;
use boss_core::entities::{
    Company, FlowDirection, InventoryItemDetails, NewCompany, NewUser, ProcessResource,
    ProductionBuilding, ProductionProcess, RefreshToken, Resource, User,
};
use boss_core::{
    BuildingId, CompanyId, CompanyRepository, DomainError, InventoryRepository, Money,
    ProcessId, ProcessResourceRepository, ProductionBuildingRepository,
    ProductionProcessRepository, RefreshTokenRepository, RepoResult, ResourceId,
    ResourceRepository, UpsertOutcome, UserId, UserRepository,
};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::services::{ServiceContext, ServiceContextBuilder};

/// Signing secret used by test contexts
pub const TEST_JWT_SECRET: &str = "test-secret-key-that-is-long-enough-123";

/// Access token lifetime used by test contexts
pub const TEST_ACCESS_TOKEN_EXPIRY: i64 = 900;

#[derive(Default)]
struct State {
    next_id: i64,
    users: BTreeMap<UserId, User>,
    refresh_tokens: Vec<RefreshToken>,
    companies: BTreeMap<CompanyId, Company>,
    resources: BTreeMap<ResourceId, Resource>,
    // (row id, quantity)
    inventory: BTreeMap<(CompanyId, ResourceId), (i64, i64)>,
    buildings: BTreeMap<BuildingId, ProductionBuilding>,
    processes: BTreeMap<ProcessId, ProductionProcess>,
    flows: BTreeMap<(ProcessId, ResourceId, FlowDirection), i64>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared in-memory store backing all repositories
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    fail_inventory_writes: AtomicBool,
    inventory_write_delay: Mutex<Option<Duration>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Builder wired to this store for every repository
    pub fn context_builder(self: &Arc<Self>) -> ServiceContextBuilder {
        ServiceContext::builder()
            .user_repo(self.clone())
            .refresh_token_repo(self.clone())
            .company_repo(self.clone())
            .resource_repo(self.clone())
            .inventory_repo(self.clone())
            .building_repo(self.clone())
            .process_repo(self.clone())
            .process_resource_repo(self.clone())
            .jwt_service(Arc::new(JwtService::new(
                TEST_JWT_SECRET,
                TEST_ACCESS_TOKEN_EXPIRY,
            )))
    }

    pub fn insert_user(&self, username: &str, password_hash: &str) -> User {
        let mut state = self.state.lock();
        let now = Utc::now();
        let user = User {
            id: UserId::new(state.next_id()),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        user
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().users.len()
    }

    /// Every stored refresh token hash, live or not
    pub fn refresh_token_hashes(&self) -> Vec<String> {
        self.state
            .lock()
            .refresh_tokens
            .iter()
            .map(|t| t.token_hash.clone())
            .collect()
    }

    /// Move the expiry of every stored refresh token
    pub fn expire_refresh_tokens(&self, at: DateTime<Utc>) {
        for token in &mut self.state.lock().refresh_tokens {
            token.expires_at = at;
        }
    }

    /// Create a user and a company for it in one step
    pub fn insert_company(&self, username: &str, money: Money) -> CompanyId {
        let user = self.insert_user(username, "hash");
        let mut state = self.state.lock();
        let now = Utc::now();
        let company = Company {
            id: CompanyId::new(state.next_id()),
            user_id: user.id,
            name: format!("{username} Holdings"),
            money,
            created_at: now,
            updated_at: now,
        };
        let id = company.id;
        state.companies.insert(id, company);
        id
    }

    pub fn insert_resource(&self, id: i64, name: &str, price: i64, pack_size: i64) -> ResourceId {
        let resource = Resource {
            id: ResourceId::new(id),
            name: name.to_string(),
            icon: String::new(),
            description: String::new(),
            price: Money::from_thousandths(price),
            pack_size,
            created_at: Utc::now(),
        };
        self.state.lock().resources.insert(resource.id, resource);
        ResourceId::new(id)
    }

    /// Current balance, zero for an unknown company
    pub fn balance(&self, company_id: CompanyId) -> Money {
        self.state
            .lock()
            .companies
            .get(&company_id)
            .map_or(Money::ZERO, |c| c.money)
    }

    pub fn units(&self, company_id: CompanyId, resource_id: ResourceId) -> Option<i64> {
        self.state
            .lock()
            .inventory
            .get(&(company_id, resource_id))
            .map(|&(_, quantity)| quantity)
    }

    /// Make every inventory write fail with a database error
    pub fn fail_inventory_writes(&self, fail: bool) {
        self.fail_inventory_writes.store(fail, Ordering::SeqCst);
    }

    /// Delay every inventory write before it applies
    pub fn stall_inventory_writes(&self, delay: Duration) {
        *self.inventory_write_delay.lock() = Some(delay);
    }

    async fn before_inventory_write(&self) -> RepoResult<()> {
        let delay = *self.inventory_write_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_inventory_writes.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError(
                "inventory store unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

/// Service context over a fresh in-memory store
pub fn test_context() -> (ServiceContext, Arc<InMemoryStore>) {
    test_context_with(|builder| builder)
}

/// Service context over a fresh in-memory store with adjusted settings
pub fn test_context_with(
    configure: impl FnOnce(ServiceContextBuilder) -> ServiceContextBuilder,
) -> (ServiceContext, Arc<InMemoryStore>) {
    let store = InMemoryStore::new();
    let ctx = configure(store.context_builder())
        .build()
        .expect("in-memory context is complete");
    (ctx, store)
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.state.lock().users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> RepoResult<User> {
        let mut state = self.state.lock();
        if state.users.values().any(|u| u.username == user.username) {
            return Err(DomainError::UserAlreadyExists);
        }
        let now = Utc::now();
        let created = User {
            id: UserId::new(state.next_id()),
            username: user.username,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(created.id, created.clone());
        Ok(created)
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryStore {
    async fn create(
        &self,
        user_id: UserId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<RefreshToken> {
        let mut state = self.state.lock();
        let token = RefreshToken {
            id: state.next_id(),
            user_id,
            token_hash: token_hash.to_string(),
            expires_at,
            revoked_at: None,
            created_at: Utc::now(),
        };
        state.refresh_tokens.push(token.clone());
        Ok(token)
    }

    async fn find_valid(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<RefreshToken>> {
        Ok(self
            .state
            .lock()
            .refresh_tokens
            .iter()
            .find(|t| t.token_hash == token_hash && t.is_usable_at(now))
            .cloned())
    }

    async fn revoke(&self, token_hash: &str, now: DateTime<Utc>) -> RepoResult<bool> {
        let mut state = self.state.lock();
        match state
            .refresh_tokens
            .iter_mut()
            .find(|t| t.token_hash == token_hash && !t.is_revoked())
        {
            Some(token) => {
                token.revoked_at = Some(now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: UserId, now: DateTime<Utc>) -> RepoResult<u64> {
        let mut revoked = 0;
        for token in &mut self.state.lock().refresh_tokens {
            if token.user_id == user_id && !token.is_revoked() {
                token.revoked_at = Some(now);
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        let mut state = self.state.lock();
        let before = state.refresh_tokens.len();
        state.refresh_tokens.retain(|t| t.expires_at > now);
        Ok((before - state.refresh_tokens.len()) as u64)
    }
}

#[async_trait]
impl CompanyRepository for InMemoryStore {
    async fn find_by_id(&self, id: CompanyId) -> RepoResult<Option<Company>> {
        Ok(self.state.lock().companies.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Option<Company>> {
        Ok(self
            .state
            .lock()
            .companies
            .values()
            .find(|c| c.user_id == user_id)
            .cloned())
    }

    async fn create(&self, company: NewCompany) -> RepoResult<Company> {
        let mut state = self.state.lock();
        if state.companies.values().any(|c| c.user_id == company.user_id) {
            return Err(DomainError::CompanyAlreadyExists);
        }
        let now = Utc::now();
        let created = Company {
            id: CompanyId::new(state.next_id()),
            user_id: company.user_id,
            name: company.name,
            money: company.money,
            created_at: now,
            updated_at: now,
        };
        state.companies.insert(created.id, created.clone());
        Ok(created)
    }

    async fn credit(&self, id: CompanyId, amount: Money) -> RepoResult<Money> {
        let mut state = self.state.lock();
        let company = state
            .companies
            .get_mut(&id)
            .ok_or(DomainError::CompanyNotFound(id))?;
        company.money = company
            .money
            .checked_add(amount)
            .ok_or_else(|| DomainError::InvalidInput("balance overflow".to_string()))?;
        company.updated_at = Utc::now();
        Ok(company.money)
    }

    async fn debit(&self, id: CompanyId, amount: Money) -> RepoResult<Money> {
        let mut state = self.state.lock();
        let company = state
            .companies
            .get_mut(&id)
            .ok_or(DomainError::CompanyNotFound(id))?;
        if !company.can_afford(amount) {
            return Err(DomainError::InsufficientFunds);
        }
        company.money = company
            .money
            .checked_sub(amount)
            .ok_or(DomainError::InsufficientFunds)?;
        company.updated_at = Utc::now();
        Ok(company.money)
    }
}

#[async_trait]
impl ResourceRepository for InMemoryStore {
    async fn find_by_id(&self, id: ResourceId) -> RepoResult<Option<Resource>> {
        Ok(self.state.lock().resources.get(&id).cloned())
    }

    async fn list_all(&self) -> RepoResult<Vec<Resource>> {
        Ok(self.state.lock().resources.values().cloned().collect())
    }

    async fn upsert(&self, resource: &Resource) -> RepoResult<UpsertOutcome> {
        let mut state = self.state.lock();
        match state.resources.get_mut(&resource.id) {
            Some(existing) => {
                let created_at = existing.created_at;
                *existing = Resource {
                    created_at,
                    ..resource.clone()
                };
                Ok(UpsertOutcome::Updated)
            }
            None => {
                state.resources.insert(resource.id, resource.clone());
                Ok(UpsertOutcome::Created)
            }
        }
    }
}

#[async_trait]
impl InventoryRepository for InMemoryStore {
    async fn quantity(
        &self,
        company_id: CompanyId,
        resource_id: ResourceId,
    ) -> RepoResult<Option<i64>> {
        Ok(self.units(company_id, resource_id))
    }

    async fn list_with_details(
        &self,
        company_id: CompanyId,
    ) -> RepoResult<Vec<InventoryItemDetails>> {
        let state = self.state.lock();
        let mut items: Vec<_> = state
            .inventory
            .iter()
            .filter(|((company, _), _)| *company == company_id)
            .filter_map(|(&(_, resource_id), &(id, quantity))| {
                state
                    .resources
                    .get(&resource_id)
                    .map(|r| InventoryItemDetails {
                        id,
                        resource_id,
                        name: r.name.clone(),
                        icon: r.icon.clone(),
                        quantity,
                        price: r.price,
                        pack_size: r.pack_size,
                    })
            })
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn add_units(
        &self,
        company_id: CompanyId,
        resource_id: ResourceId,
        units: i64,
    ) -> RepoResult<i64> {
        self.before_inventory_write().await?;
        let mut state = self.state.lock();
        if !state.resources.contains_key(&resource_id) {
            return Err(DomainError::ResourceNotFound(resource_id));
        }
        let id = state.next_id();
        let row = state
            .inventory
            .entry((company_id, resource_id))
            .or_insert((id, 0));
        row.1 = row
            .1
            .checked_add(units)
            .ok_or_else(|| DomainError::InvalidInput("quantity overflow".to_string()))?;
        Ok(row.1)
    }

    async fn remove_units(
        &self,
        company_id: CompanyId,
        resource_id: ResourceId,
        units: i64,
    ) -> RepoResult<i64> {
        self.before_inventory_write().await?;
        let mut state = self.state.lock();
        match state.inventory.get_mut(&(company_id, resource_id)) {
            Some(row) if row.1 >= units => {
                row.1 -= units;
                Ok(row.1)
            }
            _ => Err(DomainError::InsufficientStock),
        }
    }

    async fn set_units(
        &self,
        company_id: CompanyId,
        resource_id: ResourceId,
        units: i64,
    ) -> RepoResult<()> {
        self.before_inventory_write().await?;
        let mut state = self.state.lock();
        if !state.resources.contains_key(&resource_id) {
            return Err(DomainError::ResourceNotFound(resource_id));
        }
        let id = state.next_id();
        state
            .inventory
            .entry((company_id, resource_id))
            .or_insert((id, 0))
            .1 = units;
        Ok(())
    }
}

#[async_trait]
impl ProductionBuildingRepository for InMemoryStore {
    async fn list_all(&self) -> RepoResult<Vec<ProductionBuilding>> {
        Ok(self.state.lock().buildings.values().cloned().collect())
    }

    async fn upsert(&self, building: &ProductionBuilding) -> RepoResult<UpsertOutcome> {
        let previous = self
            .state
            .lock()
            .buildings
            .insert(building.id, building.clone());
        Ok(outcome(previous.is_none()))
    }
}

#[async_trait]
impl ProductionProcessRepository for InMemoryStore {
    async fn list_all(&self) -> RepoResult<Vec<ProductionProcess>> {
        Ok(self.state.lock().processes.values().cloned().collect())
    }

    async fn upsert(&self, process: &ProductionProcess) -> RepoResult<UpsertOutcome> {
        let mut state = self.state.lock();
        if !state.buildings.contains_key(&process.building_id) {
            return Err(DomainError::BuildingNotFound(process.building_id));
        }
        let previous = state.processes.insert(process.id, process.clone());
        Ok(outcome(previous.is_none()))
    }
}

#[async_trait]
impl ProcessResourceRepository for InMemoryStore {
    async fn list_all(&self) -> RepoResult<Vec<ProcessResource>> {
        Ok(self
            .state
            .lock()
            .flows
            .iter()
            .map(|(&key, &quantity)| flow(key, quantity))
            .collect())
    }

    async fn list_by_process(&self, process_id: ProcessId) -> RepoResult<Vec<ProcessResource>> {
        Ok(self
            .state
            .lock()
            .flows
            .iter()
            .filter(|((process, _, _), _)| *process == process_id)
            .map(|(&key, &quantity)| flow(key, quantity))
            .collect())
    }

    async fn upsert(&self, flow: &ProcessResource) -> RepoResult<UpsertOutcome> {
        let mut state = self.state.lock();
        if !state.processes.contains_key(&flow.process_id) {
            return Err(DomainError::ProcessNotFound(flow.process_id));
        }
        if !state.resources.contains_key(&flow.resource_id) {
            return Err(DomainError::ResourceNotFound(flow.resource_id));
        }
        let previous = state
            .flows
            .insert((flow.process_id, flow.resource_id, flow.direction), flow.quantity);
        Ok(outcome(previous.is_none()))
    }

    async fn delete(&self, flow: &ProcessResource) -> RepoResult<()> {
        self.state
            .lock()
            .flows
            .remove(&(flow.process_id, flow.resource_id, flow.direction));
        Ok(())
    }
}

fn outcome(inserted: bool) -> UpsertOutcome {
    if inserted {
        UpsertOutcome::Created
    } else {
        UpsertOutcome::Updated
    }
}

fn flow(
    (process_id, resource_id, direction): (ProcessId, ResourceId, FlowDirection),
    quantity: i64,
) -> ProcessResource {
    ProcessResource {
        process_id,
        resource_id,
        direction,
        quantity,
    }
}
