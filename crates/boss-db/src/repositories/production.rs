//! PostgreSQL implementations of the production catalog repositories

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use boss_core::entities::{ProcessResource, ProductionBuilding, ProductionProcess};
use boss_core::error::DomainError;
use boss_core::traits::{
    ProcessResourceRepository, ProductionBuildingRepository, ProductionProcessRepository,
    RepoResult, UpsertOutcome,
};
use boss_core::value_objects::ProcessId;

use crate::models::{ProcessResourceModel, ProductionBuildingModel, ProductionProcessModel};

use super::error::{map_db_error, map_foreign_key_violation, upsert_outcome};

// ============================================================================
// Buildings
// ============================================================================

/// PostgreSQL implementation of ProductionBuildingRepository
#[derive(Clone)]
pub struct PgProductionBuildingRepository {
    pool: PgPool,
}

impl PgProductionBuildingRepository {
    /// Create a new PgProductionBuildingRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductionBuildingRepository for PgProductionBuildingRepository {
    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<ProductionBuilding>> {
        let rows = sqlx::query_as::<_, ProductionBuildingModel>(
            r"
            SELECT id, name, cost
            FROM production_buildings
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ProductionBuilding::from).collect())
    }

    #[instrument(skip(self, building), fields(building_id = %building.id))]
    async fn upsert(&self, building: &ProductionBuilding) -> RepoResult<UpsertOutcome> {
        let inserted = sqlx::query_scalar::<_, bool>(
            r"
            INSERT INTO production_buildings (id, name, cost)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                cost = EXCLUDED.cost,
                updated_at = NOW()
            RETURNING (xmax = 0) AS inserted
            ",
        )
        .bind(building.id.into_inner())
        .bind(&building.name)
        .bind(building.cost.thousandths())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(upsert_outcome(inserted))
    }
}

// ============================================================================
// Processes
// ============================================================================

/// PostgreSQL implementation of ProductionProcessRepository
#[derive(Clone)]
pub struct PgProductionProcessRepository {
    pool: PgPool,
}

impl PgProductionProcessRepository {
    /// Create a new PgProductionProcessRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductionProcessRepository for PgProductionProcessRepository {
    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<ProductionProcess>> {
        let rows = sqlx::query_as::<_, ProductionProcessModel>(
            r"
            SELECT id, building_id, name, processing_time_ms, window_start_hour, window_end_hour
            FROM production_processes
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(ProductionProcess::try_from).collect()
    }

    #[instrument(skip(self, process), fields(process_id = %process.id))]
    async fn upsert(&self, process: &ProductionProcess) -> RepoResult<UpsertOutcome> {
        let (start, end) = match process.window {
            Some(window) => (Some(window.start_hour()), Some(window.end_hour())),
            None => (None, None),
        };

        let inserted = sqlx::query_scalar::<_, bool>(
            r"
            INSERT INTO production_processes
                (id, building_id, name, processing_time_ms, window_start_hour, window_end_hour)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET building_id = EXCLUDED.building_id,
                name = EXCLUDED.name,
                processing_time_ms = EXCLUDED.processing_time_ms,
                window_start_hour = EXCLUDED.window_start_hour,
                window_end_hour = EXCLUDED.window_end_hour,
                updated_at = NOW()
            RETURNING (xmax = 0) AS inserted
            ",
        )
        .bind(process.id.into_inner())
        .bind(process.building_id.into_inner())
        .bind(&process.name)
        .bind(process.processing_time_ms)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || DomainError::BuildingNotFound(process.building_id))
        })?;

        Ok(upsert_outcome(inserted))
    }
}

// ============================================================================
// Process resource flows
// ============================================================================

/// PostgreSQL implementation of ProcessResourceRepository
#[derive(Clone)]
pub struct PgProcessResourceRepository {
    pool: PgPool,
}

impl PgProcessResourceRepository {
    /// Create a new PgProcessResourceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProcessResourceRepository for PgProcessResourceRepository {
    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<ProcessResource>> {
        let rows = sqlx::query_as::<_, ProcessResourceModel>(
            r"
            SELECT process_id, resource_id, direction, quantity
            FROM production_process_resources
            ORDER BY process_id, direction, resource_id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(ProcessResource::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn list_by_process(&self, process_id: ProcessId) -> RepoResult<Vec<ProcessResource>> {
        let rows = sqlx::query_as::<_, ProcessResourceModel>(
            r"
            SELECT process_id, resource_id, direction, quantity
            FROM production_process_resources
            WHERE process_id = $1
            ORDER BY direction, resource_id
            ",
        )
        .bind(process_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(ProcessResource::try_from).collect()
    }

    #[instrument(skip(self, flow), fields(process_id = %flow.process_id, resource_id = %flow.resource_id))]
    async fn upsert(&self, flow: &ProcessResource) -> RepoResult<UpsertOutcome> {
        let inserted = sqlx::query_scalar::<_, bool>(
            r"
            INSERT INTO production_process_resources (process_id, resource_id, direction, quantity)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (process_id, resource_id, direction) DO UPDATE
            SET quantity = EXCLUDED.quantity,
                updated_at = NOW()
            RETURNING (xmax = 0) AS inserted
            ",
        )
        .bind(flow.process_id.into_inner())
        .bind(flow.resource_id.into_inner())
        .bind(flow.direction.as_str())
        .bind(flow.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || DomainError::ResourceNotFound(flow.resource_id))
        })?;

        Ok(upsert_outcome(inserted))
    }

    #[instrument(skip(self, flow), fields(process_id = %flow.process_id, resource_id = %flow.resource_id))]
    async fn delete(&self, flow: &ProcessResource) -> RepoResult<()> {
        sqlx::query(
            r"
            DELETE FROM production_process_resources
            WHERE process_id = $1 AND resource_id = $2 AND direction = $3
            ",
        )
        .bind(flow.process_id.into_inner())
        .bind(flow.resource_id.into_inner())
        .bind(flow.direction.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
