//! PostgreSQL implementation of InventoryRepository
//!
//! Stock changes are single statements: increments go through an upsert and
//! decrements are conditional on the current quantity.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use boss_core::entities::InventoryItemDetails;
use boss_core::error::DomainError;
use boss_core::traits::{InventoryRepository, RepoResult};
use boss_core::value_objects::{CompanyId, ResourceId};

use crate::models::InventoryDetailsModel;

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of InventoryRepository
#[derive(Clone)]
pub struct PgInventoryRepository {
    pool: PgPool,
}

impl PgInventoryRepository {
    /// Create a new PgInventoryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryRepository for PgInventoryRepository {
    #[instrument(skip(self))]
    async fn quantity(
        &self,
        company_id: CompanyId,
        resource_id: ResourceId,
    ) -> RepoResult<Option<i64>> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT quantity
            FROM company_inventory
            WHERE company_id = $1 AND resource_id = $2
            ",
        )
        .bind(company_id.into_inner())
        .bind(resource_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list_with_details(
        &self,
        company_id: CompanyId,
    ) -> RepoResult<Vec<InventoryItemDetails>> {
        let rows = sqlx::query_as::<_, InventoryDetailsModel>(
            r"
            SELECT ci.id, ci.resource_id, r.name, r.icon, ci.quantity, r.price, r.pack_size
            FROM company_inventory ci
            JOIN resources r ON r.id = ci.resource_id
            WHERE ci.company_id = $1
            ORDER BY r.name
            ",
        )
        .bind(company_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(InventoryItemDetails::from).collect())
    }

    #[instrument(skip(self))]
    async fn add_units(
        &self,
        company_id: CompanyId,
        resource_id: ResourceId,
        units: i64,
    ) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO company_inventory (company_id, resource_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (company_id, resource_id) DO UPDATE
            SET quantity = company_inventory.quantity + EXCLUDED.quantity,
                updated_at = NOW()
            RETURNING quantity
            ",
        )
        .bind(company_id.into_inner())
        .bind(resource_id.into_inner())
        .bind(units)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::ResourceNotFound(resource_id)))
    }

    #[instrument(skip(self))]
    async fn remove_units(
        &self,
        company_id: CompanyId,
        resource_id: ResourceId,
        units: i64,
    ) -> RepoResult<i64> {
        let remaining = sqlx::query_scalar::<_, i64>(
            r"
            UPDATE company_inventory
            SET quantity = quantity - $3, updated_at = NOW()
            WHERE company_id = $1 AND resource_id = $2 AND quantity >= $3
            RETURNING quantity
            ",
        )
        .bind(company_id.into_inner())
        .bind(resource_id.into_inner())
        .bind(units)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        remaining.ok_or(DomainError::InsufficientStock)
    }

    #[instrument(skip(self))]
    async fn set_units(
        &self,
        company_id: CompanyId,
        resource_id: ResourceId,
        units: i64,
    ) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO company_inventory (company_id, resource_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (company_id, resource_id) DO UPDATE
            SET quantity = EXCLUDED.quantity,
                updated_at = NOW()
            ",
        )
        .bind(company_id.into_inner())
        .bind(resource_id.into_inner())
        .bind(units)
        .execute(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::ResourceNotFound(resource_id)))?;

        Ok(())
    }
}
