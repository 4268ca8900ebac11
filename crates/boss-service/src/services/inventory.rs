//! Inventory service
//!
//! Stock is counted in units and never drops below zero.

use boss_core::entities::InventoryItemDetails;
use boss_core::{CompanyId, DomainError, ResourceId};
use tracing::instrument;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Inventory service
pub struct InventoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InventoryService<'a> {
    /// Create a new InventoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Increment holdings, creating the row on first acquisition
    #[instrument(skip(self))]
    pub async fn add_units(
        &self,
        company_id: CompanyId,
        resource_id: ResourceId,
        units: i64,
    ) -> ServiceResult<i64> {
        if units <= 0 {
            return Err(DomainError::InvalidQuantity(units).into());
        }
        Ok(self
            .ctx
            .inventory_repo()
            .add_units(company_id, resource_id, units)
            .await?)
    }

    /// Decrement holdings; fails with `InsufficientStock` when short
    #[instrument(skip(self))]
    pub async fn remove_units(
        &self,
        company_id: CompanyId,
        resource_id: ResourceId,
        units: i64,
    ) -> ServiceResult<i64> {
        if units <= 0 {
            return Err(DomainError::InvalidQuantity(units).into());
        }
        Ok(self
            .ctx
            .inventory_repo()
            .remove_units(company_id, resource_id, units)
            .await?)
    }

    /// Overwrite holdings (admin and seeding path)
    #[instrument(skip(self))]
    pub async fn set_units(
        &self,
        company_id: CompanyId,
        resource_id: ResourceId,
        units: i64,
    ) -> ServiceResult<()> {
        if units < 0 {
            return Err(DomainError::InvalidQuantity(units).into());
        }
        Ok(self
            .ctx
            .inventory_repo()
            .set_units(company_id, resource_id, units)
            .await?)
    }

    /// Everything a company holds, joined with resource details
    #[instrument(skip(self))]
    pub async fn list_for_company(
        &self,
        company_id: CompanyId,
    ) -> ServiceResult<Vec<InventoryItemDetails>> {
        Ok(self.ctx.inventory_repo().list_with_details(company_id).await?)
    }
}
