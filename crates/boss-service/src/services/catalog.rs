//! Catalog service
//!
//! Read-only views of the resource and production catalogs.

use std::collections::HashMap;

use boss_core::entities::{ProcessResource, ProductionProcess, Resource};
use boss_core::{BuildingId, ProcessId, ResourceId};
use tracing::instrument;

use crate::dto::{ProcessResourceResponse, ProductionBuildingResponse, ProductionProcessResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Catalog service
pub struct CatalogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CatalogService<'a> {
    /// Create a new CatalogService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All resources ordered by id
    #[instrument(skip(self))]
    pub async fn list_resources(&self) -> ServiceResult<Vec<Resource>> {
        Ok(self.ctx.resource_repo().list_all().await?)
    }

    /// Buildings with their processes and the resources each process
    /// consumes and produces
    #[instrument(skip(self))]
    pub async fn list_production_buildings(&self) -> ServiceResult<Vec<ProductionBuildingResponse>> {
        let buildings = self.ctx.building_repo().list_all().await?;
        let processes = self.ctx.process_repo().list_all().await?;
        let flows = self.ctx.process_resource_repo().list_all().await?;
        let resources = self.ctx.resource_repo().list_all().await?;

        let names: HashMap<ResourceId, String> =
            resources.into_iter().map(|r| (r.id, r.name)).collect();

        let mut flows_by_process: HashMap<ProcessId, Vec<ProcessResource>> = HashMap::new();
        for flow in flows {
            flows_by_process.entry(flow.process_id).or_default().push(flow);
        }

        let mut processes_by_building: HashMap<BuildingId, Vec<ProductionProcess>> =
            HashMap::new();
        for process in processes {
            processes_by_building
                .entry(process.building_id)
                .or_default()
                .push(process);
        }

        Ok(buildings
            .into_iter()
            .map(|building| {
                let mut processes = processes_by_building.remove(&building.id).unwrap_or_default();
                processes.sort_by_key(|p| p.id);

                ProductionBuildingResponse {
                    id: building.id.into_inner(),
                    name: building.name,
                    cost: building.cost,
                    processes: processes
                        .into_iter()
                        .map(|process| {
                            let flows = flows_by_process.remove(&process.id).unwrap_or_default();
                            process_response(process, flows, &names)
                        })
                        .collect(),
                }
            })
            .collect())
    }
}

fn process_response(
    process: ProductionProcess,
    mut flows: Vec<ProcessResource>,
    names: &HashMap<ResourceId, String>,
) -> ProductionProcessResponse {
    flows.sort_by_key(ProcessResource::key);

    ProductionProcessResponse {
        id: process.id.into_inner(),
        name: process.name,
        processing_time_ms: process.processing_time_ms,
        window_start_hour: process.window.map(|w| w.start_hour()),
        window_end_hour: process.window.map(|w| w.end_hour()),
        resources: flows
            .into_iter()
            .map(|flow| ProcessResourceResponse {
                resource_id: flow.resource_id.into_inner(),
                resource_name: names.get(&flow.resource_id).cloned().unwrap_or_default(),
                direction: flow.direction.to_string(),
                quantity: flow.quantity,
            })
            .collect(),
    }
}
