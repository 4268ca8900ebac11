//! Production catalog model -> entity mappers

use boss_core::entities::{
    FlowDirection, ProcessResource, ProductionBuilding, ProductionProcess, TimeWindow,
};
use boss_core::error::DomainError;
use boss_core::value_objects::{BuildingId, Money, ProcessId, ResourceId};

use crate::models::{ProcessResourceModel, ProductionBuildingModel, ProductionProcessModel};

impl From<ProductionBuildingModel> for ProductionBuilding {
    fn from(model: ProductionBuildingModel) -> Self {
        ProductionBuilding {
            id: BuildingId::new(model.id),
            name: model.name,
            cost: Money::from_thousandths(model.cost),
        }
    }
}

impl TryFrom<ProductionProcessModel> for ProductionProcess {
    type Error = DomainError;

    fn try_from(model: ProductionProcessModel) -> Result<Self, Self::Error> {
        Ok(ProductionProcess {
            id: ProcessId::new(model.id),
            building_id: BuildingId::new(model.building_id),
            name: model.name,
            processing_time_ms: model.processing_time_ms,
            window: TimeWindow::from_columns(model.window_start_hour, model.window_end_hour)?,
        })
    }
}

impl TryFrom<ProcessResourceModel> for ProcessResource {
    type Error = DomainError;

    fn try_from(model: ProcessResourceModel) -> Result<Self, Self::Error> {
        Ok(ProcessResource {
            process_id: ProcessId::new(model.process_id),
            resource_id: ResourceId::new(model.resource_id),
            direction: model.direction.parse::<FlowDirection>()?,
            quantity: model.quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_window_columns() {
        let model = ProductionProcessModel {
            id: 3,
            building_id: 1,
            name: "Night shift".to_string(),
            processing_time_ms: 5000,
            window_start_hour: Some(20),
            window_end_hour: Some(23),
        };
        let process = ProductionProcess::try_from(model).unwrap();
        let window = process.window.unwrap();
        assert_eq!((window.start_hour(), window.end_hour()), (20, 23));
    }

    #[test]
    fn test_half_window_is_rejected() {
        let model = ProductionProcessModel {
            id: 3,
            building_id: 1,
            name: "Broken".to_string(),
            processing_time_ms: 5000,
            window_start_hour: Some(20),
            window_end_hour: None,
        };
        assert!(ProductionProcess::try_from(model).is_err());
    }

    #[test]
    fn test_flow_direction_column() {
        let model = ProcessResourceModel {
            process_id: 1,
            resource_id: 2,
            direction: "output".to_string(),
            quantity: 4,
        };
        let flow = ProcessResource::try_from(model).unwrap();
        assert_eq!(flow.direction, FlowDirection::Output);

        let bad = ProcessResourceModel {
            process_id: 1,
            resource_id: 2,
            direction: "both".to_string(),
            quantity: 4,
        };
        assert!(ProcessResource::try_from(bad).is_err());
    }
}
