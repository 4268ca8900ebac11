//! Catalog seeding
//!
//! Loads the resource and production-building catalogs from JSON files at
//! startup. Records are upserted by id; invalid records are skipped. A file
//! that cannot be read or parsed is reported and the rest of startup goes on.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use boss_core::entities::{
    FlowDirection, ProcessResource, ProductionBuilding, ProductionProcess, Resource, TimeWindow,
};
use boss_core::{BuildingId, Money, ProcessId, ResourceId, UpsertOutcome};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Resource record in the seed file
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceSeed {
    pub id: i64,
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub pack_size: i64,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
}

/// Building record in the seed file
#[derive(Debug, Clone, Deserialize)]
pub struct BuildingSeed {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub cost: i64,
    #[serde(default)]
    pub processes: Vec<ProcessSeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessSeed {
    pub id: i64,
    pub name: String,
    pub processing_time_ms: i64,
    #[serde(default)]
    pub time_window: Option<TimeWindowSeed>,
    #[serde(default)]
    pub resources: Vec<FlowSeed>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TimeWindowSeed {
    pub start_hour: i64,
    pub end_hour: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlowSeed {
    pub resource_id: i64,
    pub direction: String,
    pub quantity: i64,
}

/// Per-table change counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedCounts {
    pub created: u64,
    pub updated: u64,
    pub deleted: u64,
}

impl SeedCounts {
    fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created => self.created += 1,
            UpsertOutcome::Updated => self.updated += 1,
        }
    }
}

/// Counters for the production-building file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductionSeedCounts {
    pub buildings: SeedCounts,
    pub processes: SeedCounts,
    pub flows: SeedCounts,
}

/// What a full seeding run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub resources: SeedCounts,
    pub production: ProductionSeedCounts,
}

/// Seed file errors
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Store(#[from] ServiceError),
}

/// Catalog seeding service
pub struct SeedService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SeedService<'a> {
    /// Create a new SeedService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Seed both catalogs. Resources go first so flows can reference them.
    /// Failures are logged per file and never abort startup.
    #[instrument(skip(self))]
    pub async fn run(&self, resources_path: &Path, buildings_path: &Path) -> SeedReport {
        let mut report = SeedReport::default();

        match self.seed_resources(resources_path).await {
            Ok(counts) => report.resources = counts,
            Err(e) => warn!(error = %e, "Resource catalog not seeded"),
        }

        match self.seed_production_buildings(buildings_path).await {
            Ok(counts) => report.production = counts,
            Err(e) => warn!(error = %e, "Production catalog not seeded"),
        }

        info!(
            resources_created = report.resources.created,
            resources_updated = report.resources.updated,
            buildings_created = report.production.buildings.created,
            buildings_updated = report.production.buildings.updated,
            processes_created = report.production.processes.created,
            processes_updated = report.production.processes.updated,
            flows_created = report.production.flows.created,
            flows_updated = report.production.flows.updated,
            flows_deleted = report.production.flows.deleted,
            "Catalog seeding finished"
        );
        report
    }

    /// Load and apply the resource file
    #[instrument(skip(self))]
    pub async fn seed_resources(&self, path: &Path) -> Result<SeedCounts, SeedError> {
        let seeds: Vec<ResourceSeed> = read_json(path).await?;
        Ok(self.apply_resources(seeds).await?)
    }

    /// Load and apply the production-building file
    #[instrument(skip(self))]
    pub async fn seed_production_buildings(
        &self,
        path: &Path,
    ) -> Result<ProductionSeedCounts, SeedError> {
        let seeds: Vec<BuildingSeed> = read_json(path).await?;
        Ok(self.apply_production_buildings(seeds).await?)
    }

    /// Upsert resources by id
    pub async fn apply_resources(&self, seeds: Vec<ResourceSeed>) -> ServiceResult<SeedCounts> {
        let mut counts = SeedCounts::default();

        for seed in seeds {
            if seed.id <= 0 || seed.name.is_empty() {
                debug!(id = seed.id, "Skipping resource seed without id or name");
                continue;
            }
            if seed.price < 0 {
                warn!(id = seed.id, price = seed.price, "Skipping resource seed with negative price");
                continue;
            }

            let resource = Resource {
                id: ResourceId::new(seed.id),
                name: seed.name,
                icon: seed.icon,
                description: seed.description,
                price: Money::from_thousandths(seed.price),
                pack_size: if seed.pack_size <= 0 { 1 } else { seed.pack_size },
                created_at: Utc::now(),
            };
            counts.record(self.ctx.resource_repo().upsert(&resource).await?);
        }

        Ok(counts)
    }

    /// Upsert buildings, their processes and process flows. Flows stored for
    /// a seeded process but absent from the file are deleted.
    pub async fn apply_production_buildings(
        &self,
        seeds: Vec<BuildingSeed>,
    ) -> ServiceResult<ProductionSeedCounts> {
        let mut counts = ProductionSeedCounts::default();

        for seed in seeds {
            if seed.id <= 0 || seed.name.is_empty() {
                debug!(id = seed.id, "Skipping building seed without id or name");
                continue;
            }
            if seed.cost < 0 {
                warn!(id = seed.id, cost = seed.cost, "Skipping building seed with negative cost");
                continue;
            }

            let building = ProductionBuilding {
                id: BuildingId::new(seed.id),
                name: seed.name,
                cost: Money::from_thousandths(seed.cost),
            };
            counts
                .buildings
                .record(self.ctx.building_repo().upsert(&building).await?);

            for process_seed in seed.processes {
                let Some(process) = to_process(building.id, &process_seed) else {
                    debug!(id = process_seed.id, "Skipping invalid process seed");
                    continue;
                };
                counts
                    .processes
                    .record(self.ctx.process_repo().upsert(&process).await?);

                self.sync_flows(process.id, &process_seed.resources, &mut counts.flows)
                    .await?;
            }
        }

        Ok(counts)
    }

    async fn sync_flows(
        &self,
        process_id: ProcessId,
        seeds: &[FlowSeed],
        counts: &mut SeedCounts,
    ) -> ServiceResult<()> {
        let existing = self
            .ctx
            .process_resource_repo()
            .list_by_process(process_id)
            .await?;
        let stored: HashMap<(ResourceId, FlowDirection), i64> =
            existing.iter().map(|f| (f.key(), f.quantity)).collect();

        let mut seen = HashSet::new();
        for seed in seeds {
            if seed.resource_id <= 0 || seed.quantity <= 0 {
                continue;
            }
            let Ok(direction) = seed.direction.parse::<FlowDirection>() else {
                continue;
            };
            let resource_id = ResourceId::new(seed.resource_id);
            if self.ctx.resource_repo().find_by_id(resource_id).await?.is_none() {
                debug!(%resource_id, "Skipping flow for unknown resource");
                continue;
            }

            let flow = ProcessResource {
                process_id,
                resource_id,
                direction,
                quantity: seed.quantity,
            };
            match stored.get(&flow.key()) {
                Some(&quantity) if quantity != flow.quantity => counts.updated += 1,
                Some(_) => {}
                None => counts.created += 1,
            }
            self.ctx.process_resource_repo().upsert(&flow).await?;
            seen.insert(flow.key());
        }

        for stale in existing.iter().filter(|f| !seen.contains(&f.key())) {
            self.ctx.process_resource_repo().delete(stale).await?;
            counts.deleted += 1;
        }

        Ok(())
    }
}

/// Build a process from its seed, `None` when the record is invalid
fn to_process(building_id: BuildingId, seed: &ProcessSeed) -> Option<ProductionProcess> {
    if seed.id <= 0 || seed.name.is_empty() || seed.processing_time_ms <= 0 {
        return None;
    }
    let window = match seed.time_window {
        Some(w) => Some(TimeWindow::new(w.start_hour, w.end_hour).ok()?),
        None => None,
    };

    Some(ProductionProcess {
        id: ProcessId::new(seed.id),
        building_id,
        name: seed.name.clone(),
        processing_time_ms: seed.processing_time_ms,
        window,
    })
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SeedError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_context;
    use serde_json::json;

    fn buildings(value: serde_json::Value) -> Vec<BuildingSeed> {
        serde_json::from_value(value).unwrap()
    }

    fn resources(value: serde_json::Value) -> Vec<ResourceSeed> {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_resources_are_validated_and_upserted() {
        let (ctx, _store) = test_context();
        let seeder = SeedService::new(&ctx);

        let counts = seeder
            .apply_resources(resources(json!([
                {"id": 1, "name": "Wood", "price": 1000, "pack_size": 10},
                {"id": 2, "name": "Stone", "price": 2000, "pack_size": 0},
                {"id": 0, "name": "Nothing", "price": 1, "pack_size": 1},
                {"id": 3, "name": "", "price": 1, "pack_size": 1}
            ])))
            .await
            .unwrap();
        assert_eq!(counts, SeedCounts { created: 2, updated: 0, deleted: 0 });

        let stone = ctx
            .resource_repo()
            .find_by_id(ResourceId::new(2))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stone.pack_size, 1);

        let counts = seeder
            .apply_resources(resources(json!([
                {"id": 1, "name": "Oak", "price": 1500, "pack_size": 10}
            ])))
            .await
            .unwrap();
        assert_eq!(counts.updated, 1);
        let wood = ctx
            .resource_repo()
            .find_by_id(ResourceId::new(1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(wood.name, "Oak");
        assert_eq!(wood.price, Money::from_thousandths(1500));
    }

    #[tokio::test]
    async fn test_negative_prices_are_skipped_without_aborting() {
        let (ctx, _store) = test_context();
        let seeder = SeedService::new(&ctx);

        let counts = seeder
            .apply_resources(resources(json!([
                {"id": 1, "name": "Wood", "price": 1000, "pack_size": 10},
                {"id": 9, "name": "Debt", "price": -5000, "pack_size": 1},
                {"id": 2, "name": "Stone", "price": 0, "pack_size": 5}
            ])))
            .await
            .unwrap();
        assert_eq!(counts.created, 2);

        let repo = ctx.resource_repo();
        assert!(repo.find_by_id(ResourceId::new(9)).await.unwrap().is_none());
        assert!(repo.find_by_id(ResourceId::new(2)).await.unwrap().is_some());

        let counts = seeder
            .apply_production_buildings(buildings(json!([
                {"id": 1, "name": "Sinkhole", "cost": -1, "processes": [
                    {"id": 1, "name": "Dig", "processing_time_ms": 10}
                ]},
                {"id": 2, "name": "Sawmill", "cost": 5000}
            ])))
            .await
            .unwrap();
        assert_eq!(counts.buildings.created, 1);
        assert_eq!(counts.processes.created, 0);
        let names: Vec<_> = ctx
            .building_repo()
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["Sawmill".to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_processes_and_flows_are_skipped() {
        let (ctx, store) = test_context();
        store.insert_resource(1, "Wood", 1_000, 10);
        let seeder = SeedService::new(&ctx);

        let counts = seeder
            .apply_production_buildings(buildings(json!([
                {"id": 0, "name": "Ghost", "cost": 1},
                {"id": 1, "name": "Sawmill", "cost": 5000, "processes": [
                    {"id": 1, "name": "Cut", "processing_time_ms": 1000,
                     "time_window": {"start_hour": 6, "end_hour": 20},
                     "resources": [
                        {"resource_id": 1, "direction": "input", "quantity": 5},
                        {"resource_id": 1, "direction": "sideways", "quantity": 5},
                        {"resource_id": 9, "direction": "output", "quantity": 1},
                        {"resource_id": 1, "direction": "output", "quantity": 0}
                     ]},
                    {"id": 2, "name": "Slow", "processing_time_ms": 0},
                    {"id": 3, "name": "Night", "processing_time_ms": 10,
                     "time_window": {"start_hour": 20, "end_hour": 6}},
                    {"id": 4, "name": "Late", "processing_time_ms": 10,
                     "time_window": {"start_hour": 1, "end_hour": 24}}
                ]}
            ])))
            .await
            .unwrap();

        assert_eq!(counts.buildings.created, 1);
        assert_eq!(counts.processes.created, 1);
        assert_eq!(counts.flows.created, 1);
        assert_eq!(ctx.process_repo().list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reseed_updates_and_deletes_stale_flows() {
        let (ctx, store) = test_context();
        store.insert_resource(1, "Wood", 1_000, 10);
        store.insert_resource(2, "Plank", 3_000, 10);
        let seeder = SeedService::new(&ctx);

        let first = json!([
            {"id": 1, "name": "Sawmill", "cost": 5000, "processes": [
                {"id": 1, "name": "Cut", "processing_time_ms": 1000, "resources": [
                    {"resource_id": 1, "direction": "input", "quantity": 5},
                    {"resource_id": 2, "direction": "output", "quantity": 2}
                ]}
            ]}
        ]);
        seeder.apply_production_buildings(buildings(first)).await.unwrap();

        let second = json!([
            {"id": 1, "name": "Sawmill", "cost": 5000, "processes": [
                {"id": 1, "name": "Cut", "processing_time_ms": 1000, "resources": [
                    {"resource_id": 1, "direction": "input", "quantity": 8}
                ]}
            ]}
        ]);
        let counts = seeder
            .apply_production_buildings(buildings(second))
            .await
            .unwrap();

        assert_eq!(counts.buildings.updated, 1);
        assert_eq!(counts.processes.updated, 1);
        assert_eq!(counts.flows, SeedCounts { created: 0, updated: 1, deleted: 1 });

        let flows = ctx
            .process_resource_repo()
            .list_by_process(ProcessId::new(1))
            .await
            .unwrap();
        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].quantity, 8);
    }

    #[tokio::test]
    async fn test_unchanged_flow_is_not_counted() {
        let (ctx, store) = test_context();
        store.insert_resource(1, "Wood", 1_000, 10);
        let seeder = SeedService::new(&ctx);
        let file = json!([
            {"id": 1, "name": "Sawmill", "processes": [
                {"id": 1, "name": "Cut", "processing_time_ms": 1000, "resources": [
                    {"resource_id": 1, "direction": "input", "quantity": 5}
                ]}
            ]}
        ]);

        seeder.apply_production_buildings(buildings(file.clone())).await.unwrap();
        let counts = seeder.apply_production_buildings(buildings(file)).await.unwrap();

        assert_eq!(counts.flows, SeedCounts::default());
    }

    #[tokio::test]
    async fn test_missing_and_malformed_files_do_not_abort() {
        let (ctx, _store) = test_context();
        let seeder = SeedService::new(&ctx);

        let dir = std::env::temp_dir().join(format!("boss-seed-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let malformed = dir.join("buildings.json");
        tokio::fs::write(&malformed, b"{ not json").await.unwrap();

        let missing = dir.join("does-not-exist.json");
        assert!(matches!(
            seeder.seed_resources(&missing).await,
            Err(SeedError::Read { .. })
        ));
        assert!(matches!(
            seeder.seed_production_buildings(&malformed).await,
            Err(SeedError::Parse { .. })
        ));

        let report = seeder.run(&missing, &malformed).await;
        assert_eq!(report, SeedReport::default());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
