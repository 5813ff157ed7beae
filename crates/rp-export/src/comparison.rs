//! Side-by-side scenario summaries.

use crate::{ExportError, ExportResult};
use rp_project::ScenarioRecord;
use rp_solver::CalculationResult;
use serde::{Deserialize, Serialize};

/// Most scenarios shown side by side.
pub const MAX_COMPARED: usize = 3;

/// Headline figures of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonItem {
    pub id: String,
    pub name: String,
    pub gross_m2: f64,
    pub lots_m2: f64,
    pub roads_m2: f64,
    pub buffers_m2: f64,
    pub amenities_m2: f64,
    pub net_lot_to_gross_pct: f64,
    pub road_pct: f64,
    pub units: u64,
}

impl ComparisonItem {
    pub fn from_result(
        id: impl Into<String>,
        name: impl Into<String>,
        result: &CalculationResult,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gross_m2: result.areas.gross_m2,
            lots_m2: result.areas.lots_m2,
            roads_m2: result.areas.roads_m2,
            buffers_m2: result.areas.buffers_m2,
            amenities_m2: result.areas.amenities_m2,
            net_lot_to_gross_pct: result.efficiency.net_lot_to_gross_pct,
            road_pct: result.efficiency.road_pct,
            units: result.total_units(),
        }
    }

    pub fn from_record(record: &ScenarioRecord) -> Self {
        Self::from_result(&record.id, &record.name, &record.output)
    }

    pub fn open_space_m2(&self) -> f64 {
        self.buffers_m2 + self.amenities_m2
    }
}

pub fn check_comparison(items: &[ComparisonItem]) -> ExportResult<()> {
    if items.is_empty() {
        return Err(ExportError::EmptyComparison);
    }
    if items.len() > MAX_COMPARED {
        return Err(ExportError::TooManyScenarios {
            count: items.len(),
            max: MAX_COMPARED,
        });
    }
    Ok(())
}
