//! Production catalog database models

use sqlx::FromRow;

/// Database model for production_buildings table
#[derive(Debug, Clone, FromRow)]
pub struct ProductionBuildingModel {
    pub id: i64,
    pub name: String,
    pub cost: i64,
}

/// Database model for production_processes table
#[derive(Debug, Clone, FromRow)]
pub struct ProductionProcessModel {
    pub id: i64,
    pub building_id: i64,
    pub name: String,
    pub processing_time_ms: i64,
    pub window_start_hour: Option<i16>,
    pub window_end_hour: Option<i16>,
}

/// Database model for production_process_resources table
#[derive(Debug, Clone, FromRow)]
pub struct ProcessResourceModel {
    pub process_id: i64,
    pub resource_id: i64,
    pub direction: String,
    pub quantity: i64,
}
