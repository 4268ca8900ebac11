//! Production catalog entities - buildings, their processes and resource flows
//!
//! These are descriptive data only. Nothing in the backend runs a process.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::{BuildingId, Money, ProcessId, ResourceId};

/// A building that can be constructed and hosts production processes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionBuilding {
    pub id: BuildingId,
    pub name: String,
    pub cost: Money,
}

/// Daily activity window, in whole hours of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start_hour: i16,
    end_hour: i16,
}

impl TimeWindow {
    pub const LAST_HOUR: i64 = 23;

    /// Both hours must be in `0..=23` and `start < end`
    pub fn new(start_hour: i64, end_hour: i64) -> Result<Self, DomainError> {
        let in_range = |h: i64| (0..=Self::LAST_HOUR).contains(&h);
        if !in_range(start_hour) || !in_range(end_hour) || start_hour >= end_hour {
            return Err(DomainError::InvalidTimeWindow {
                start: start_hour,
                end: end_hour,
            });
        }
        Ok(Self {
            start_hour: start_hour as i16,
            end_hour: end_hour as i16,
        })
    }

    /// Rebuild from a pair of nullable columns; both set or both null
    pub fn from_columns(
        start_hour: Option<i16>,
        end_hour: Option<i16>,
    ) -> Result<Option<Self>, DomainError> {
        match (start_hour, end_hour) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => Self::new(i64::from(start), i64::from(end)).map(Some),
            (start, end) => Err(DomainError::InvalidTimeWindow {
                start: start.map_or(-1, i64::from),
                end: end.map_or(-1, i64::from),
            }),
        }
    }

    #[inline]
    pub fn start_hour(self) -> i16 {
        self.start_hour
    }

    #[inline]
    pub fn end_hour(self) -> i16 {
        self.end_hour
    }

    /// Whether `hour` falls inside `[start, end)`
    pub fn contains_hour(self, hour: u32) -> bool {
        let hour = i64::from(hour);
        hour >= i64::from(self.start_hour) && hour < i64::from(self.end_hour)
    }
}

/// A recipe run inside a building
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionProcess {
    pub id: ProcessId,
    pub building_id: BuildingId,
    pub name: String,
    pub processing_time_ms: i64,
    pub window: Option<TimeWindow>,
}

/// Whether a process consumes or produces a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    Input,
    Output,
}

impl FlowDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(Self::Input),
            "output" => Ok(Self::Output),
            other => Err(DomainError::InvalidInput(format!(
                "unknown flow direction: {other}"
            ))),
        }
    }
}

/// One resource flow of a process. Unique per (process, resource, direction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResource {
    pub process_id: ProcessId,
    pub resource_id: ResourceId,
    pub direction: FlowDirection,
    pub quantity: i64,
}

impl ProcessResource {
    /// Key used to match seeded flows against stored ones
    pub fn key(&self) -> (ResourceId, FlowDirection) {
        (self.resource_id, self.direction)
    }
}
