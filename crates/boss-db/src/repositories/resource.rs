//! PostgreSQL implementation of ResourceRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use boss_core::entities::Resource;
use boss_core::traits::{RepoResult, ResourceRepository, UpsertOutcome};
use boss_core::value_objects::ResourceId;

use crate::models::ResourceModel;

use super::error::{map_db_error, upsert_outcome};

/// PostgreSQL implementation of ResourceRepository
#[derive(Clone)]
pub struct PgResourceRepository {
    pool: PgPool,
}

impl PgResourceRepository {
    /// Create a new PgResourceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository for PgResourceRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ResourceId) -> RepoResult<Option<Resource>> {
        let result = sqlx::query_as::<_, ResourceModel>(
            r"
            SELECT id, name, icon, description, price, pack_size, created_at
            FROM resources
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Resource::from))
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<Resource>> {
        let rows = sqlx::query_as::<_, ResourceModel>(
            r"
            SELECT id, name, icon, description, price, pack_size, created_at
            FROM resources
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Resource::from).collect())
    }

    #[instrument(skip(self, resource), fields(resource_id = %resource.id))]
    async fn upsert(&self, resource: &Resource) -> RepoResult<UpsertOutcome> {
        let inserted = sqlx::query_scalar::<_, bool>(
            r"
            INSERT INTO resources (id, name, icon, description, price, pack_size)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                icon = EXCLUDED.icon,
                description = EXCLUDED.description,
                price = EXCLUDED.price,
                pack_size = EXCLUDED.pack_size
            RETURNING (xmax = 0) AS inserted
            ",
        )
        .bind(resource.id.into_inner())
        .bind(&resource.name)
        .bind(&resource.icon)
        .bind(&resource.description)
        .bind(resource.price.thousandths())
        .bind(resource.pack_size)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(upsert_outcome(inserted))
    }
}
