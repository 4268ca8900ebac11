//! Market engine
//!
//! Buys and sells resources at catalog prices. A trade touches two rows (the
//! company balance and one inventory row) in two separate store calls; when
//! the second call fails the first is undone with a compensating write.
//!
//! Every store call runs under the request deadline. Compensating writes get
//! their own grace period so an expired deadline cannot strand a debit.

use std::future::Future;
use std::time::Duration;

use boss_core::{CompanyId, DomainError, Money, ResourceId, UserId};
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{error, info, instrument, warn};

use crate::dto::TradeRequest;

use super::company::CompanyService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::inventory::InventoryService;
use super::ledger::LedgerService;

/// Time allowed for a compensating write after the step it undoes failed
pub const COMPENSATION_GRACE: Duration = Duration::from_secs(5);

/// Outcome of a completed trade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeReceipt {
    pub company_id: CompanyId,
    pub resource_id: ResourceId,
    pub packs: i64,
    pub units: i64,
    /// Total paid (buy) or received (sell)
    pub amount: Money,
    /// Balance after the trade
    pub balance: Money,
    /// Units held after the trade
    pub quantity: i64,
}

/// Market engine
pub struct MarketService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MarketService<'a> {
    /// Create a new MarketService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Buy on behalf of the user's company
    #[instrument(skip(self, deadline))]
    pub async fn buy_for_user(
        &self,
        user_id: UserId,
        request: TradeRequest,
        deadline: Instant,
    ) -> ServiceResult<TradeReceipt> {
        let company = CompanyService::new(self.ctx).get_by_user(user_id).await?;
        self.buy(
            company.id,
            ResourceId::new(request.resource_id),
            request.pack_count,
            deadline,
        )
        .await
    }

    /// Sell on behalf of the user's company
    #[instrument(skip(self, deadline))]
    pub async fn sell_for_user(
        &self,
        user_id: UserId,
        request: TradeRequest,
        deadline: Instant,
    ) -> ServiceResult<TradeReceipt> {
        let company = CompanyService::new(self.ctx).get_by_user(user_id).await?;
        self.sell(
            company.id,
            ResourceId::new(request.resource_id),
            request.pack_count,
            deadline,
        )
        .await
    }

    /// Buy `packs` packs of a resource.
    ///
    /// The cost is debited first; if the units cannot be added afterwards the
    /// cost is credited back and the inventory error is returned.
    #[instrument(skip(self, deadline))]
    pub async fn buy(
        &self,
        company_id: CompanyId,
        resource_id: ResourceId,
        packs: i64,
        deadline: Instant,
    ) -> ServiceResult<TradeReceipt> {
        let (cost, units) = self.quote(resource_id, packs, deadline).await?;

        let company = within(
            deadline,
            "load company",
            self.ctx.company_repo().find_by_id(company_id),
        )
        .await?
        .ok_or(DomainError::CompanyNotFound(company_id))?;
        if !company.can_afford(cost) {
            return Err(DomainError::InsufficientFunds.into());
        }

        let ledger = LedgerService::new(self.ctx);
        let balance = within(deadline, "debit", ledger.debit(company_id, cost)).await?;

        let added = within(
            deadline,
            "add inventory",
            InventoryService::new(self.ctx).add_units(company_id, resource_id, units),
        )
        .await;

        match added {
            Ok(quantity) => {
                info!(%cost, units, %balance, "Resource purchased");
                Ok(TradeReceipt {
                    company_id,
                    resource_id,
                    packs,
                    units,
                    amount: cost,
                    balance,
                    quantity,
                })
            }
            Err(err) => {
                warn!(error = %err, "Purchase failed after debit, refunding");
                compensate("refund purchase", ledger.credit(company_id, cost)).await;
                Err(err)
            }
        }
    }

    /// Sell `packs` packs of a resource.
    ///
    /// The revenue is credited first; if the units cannot be removed
    /// afterwards the revenue is debited again and the inventory error is
    /// returned.
    #[instrument(skip(self, deadline))]
    pub async fn sell(
        &self,
        company_id: CompanyId,
        resource_id: ResourceId,
        packs: i64,
        deadline: Instant,
    ) -> ServiceResult<TradeReceipt> {
        let (revenue, units) = self.quote(resource_id, packs, deadline).await?;

        within(
            deadline,
            "load company",
            self.ctx.company_repo().find_by_id(company_id),
        )
        .await?
        .ok_or(DomainError::CompanyNotFound(company_id))?;

        let held = within(
            deadline,
            "load inventory",
            self.ctx.inventory_repo().quantity(company_id, resource_id),
        )
        .await?
        .unwrap_or(0);
        if held < units {
            return Err(DomainError::InsufficientStock.into());
        }

        let ledger = LedgerService::new(self.ctx);
        let balance = within(deadline, "credit", ledger.credit(company_id, revenue)).await?;

        let removed = within(
            deadline,
            "remove inventory",
            InventoryService::new(self.ctx).remove_units(company_id, resource_id, units),
        )
        .await;

        match removed {
            Ok(quantity) => {
                info!(%revenue, units, %balance, "Resource sold");
                Ok(TradeReceipt {
                    company_id,
                    resource_id,
                    packs,
                    units,
                    amount: revenue,
                    balance,
                    quantity,
                })
            }
            Err(err) => {
                warn!(error = %err, "Sale failed after credit, reclaiming revenue");
                compensate("reclaim sale revenue", ledger.debit(company_id, revenue)).await;
                Err(err)
            }
        }
    }

    /// Validate the pack count and price the trade as `(amount, units)`
    async fn quote(
        &self,
        resource_id: ResourceId,
        packs: i64,
        deadline: Instant,
    ) -> ServiceResult<(Money, i64)> {
        if packs <= 0 {
            return Err(DomainError::InvalidPackCount(packs).into());
        }

        let resource = within(
            deadline,
            "load resource",
            self.ctx.resource_repo().find_by_id(resource_id),
        )
        .await?
        .ok_or(DomainError::ResourceNotFound(resource_id))?;

        let amount = resource
            .cost_of(packs)
            .ok_or_else(|| DomainError::InvalidInput("trade value overflows".into()))?;
        if !amount.is_positive() {
            warn!(%resource_id, price = %resource.price, "Resource has no positive price");
            return Err(DomainError::InvalidInput("resource is not for sale".into()).into());
        }
        let units = resource
            .units_in(packs)
            .ok_or_else(|| DomainError::InvalidInput("trade size overflows".into()))?;

        Ok((amount, units))
    }
}

/// Run one store step, failing with `Timeout(op)` once the deadline passes
async fn within<T, E, F>(deadline: Instant, op: &'static str, step: F) -> ServiceResult<T>
where
    E: Into<ServiceError>,
    F: Future<Output = Result<T, E>>,
{
    match timeout_at(deadline, step).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => {
            warn!(op, "Trade step hit the request deadline");
            Err(DomainError::Timeout(op).into())
        }
    }
}

/// Undo a completed step. Failures are logged, never returned.
async fn compensate<T, F>(op: &'static str, undo: F)
where
    F: Future<Output = ServiceResult<T>>,
{
    match timeout(COMPENSATION_GRACE, undo).await {
        Ok(Ok(_)) => info!(op, "Compensation applied"),
        Ok(Err(err)) => error!(op, error = %err, "Compensation failed"),
        Err(_) => error!(op, "Compensation timed out"),
    }
}
