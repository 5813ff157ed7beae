//! Query helpers over saved scenarios.

use rp_project::ScenarioRecord;
use serde::Serialize;

/// Headline figures of a saved scenario for listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSummary {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub total_units: u64,
    pub gross_m2: f64,
    pub lots_m2: f64,
    pub net_lot_to_gross_pct: f64,
    pub road_pct: f64,
    pub non_sellable_pct: f64,
    pub warning_count: usize,
}

pub fn summarize_scenario(record: &ScenarioRecord) -> ScenarioSummary {
    let output = &record.output;
    ScenarioSummary {
        id: record.id.clone(),
        name: record.name.clone(),
        created_at: record.created_at.clone(),
        total_units: output.total_units(),
        gross_m2: output.areas.gross_m2,
        lots_m2: output.areas.lots_m2,
        net_lot_to_gross_pct: output.efficiency.net_lot_to_gross_pct,
        road_pct: output.efficiency.road_pct,
        non_sellable_pct: output.efficiency.non_sellable_pct,
        warning_count: output.warnings.len(),
    }
}
