//! Solver input and output records.
//!
//! Field names are snake_case with a unit suffix. The camelCase names used by
//! earlier saved scenarios are accepted on read.

use core::fmt;
use serde::{Deserialize, Serialize};

/// One residential lot product offered on the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: String,
    pub name: String,
    /// Lot frontage (m)
    #[serde(alias = "widthM")]
    pub width_m: f64,
    #[serde(alias = "depthM")]
    pub depth_m: f64,
    /// Target share of units, 0-100
    #[serde(alias = "mixPct")]
    pub mix_pct: f64,
}

impl ProductType {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        width_m: f64,
        depth_m: f64,
        mix_pct: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            width_m,
            depth_m,
            mix_pct,
        }
    }

    pub fn lot_area_m2(&self) -> f64 {
        self.width_m * self.depth_m
    }
}

/// Fixed land taken out of the site before lots and roads are placed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NonSellables {
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "buffersM2")]
    pub buffers_m2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "amenitiesM2")]
    pub amenities_m2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "easementsM2")]
    pub easements_m2: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteInput {
    #[serde(alias = "grossAreaHa")]
    pub gross_area_ha: f64,
    #[serde(alias = "rowWidthM")]
    pub row_width_m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "roadCoeffK")]
    pub road_coeff_k: Option<f64>,
    #[serde(default)]
    pub products: Vec<ProductType>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "nonSellables")]
    pub non_sellables: Option<NonSellables>,
}

impl SiteInput {
    /// Fixed non-sellable components with absent values read as zero.
    pub fn fixed_non_sellables(&self) -> FixedNonSellables {
        let n = self.non_sellables.as_ref();
        FixedNonSellables {
            buffers_m2: n.and_then(|n| n.buffers_m2).unwrap_or(0.0),
            amenities_m2: n.and_then(|n| n.amenities_m2).unwrap_or(0.0),
            easements_m2: n.and_then(|n| n.easements_m2).unwrap_or(0.0),
        }
    }
}

/// Resolved fixed non-sellable areas (m²).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedNonSellables {
    pub buffers_m2: f64,
    pub amenities_m2: f64,
    pub easements_m2: f64,
}

impl FixedNonSellables {
    pub fn total(&self) -> f64 {
        self.buffers_m2 + self.amenities_m2 + self.easements_m2
    }
}

/// A product type with its resolved share of the unit total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProduct {
    pub id: String,
    pub name: String,
    pub width_m: f64,
    pub depth_m: f64,
    pub lot_area_m2: f64,
    /// Fraction in [0, 1]; fractions sum to 1 across a solve
    pub mix: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitsByType {
    pub id: String,
    pub name: String,
    #[serde(alias = "widthM")]
    pub width_m: f64,
    #[serde(alias = "depthM")]
    pub depth_m: f64,
    #[serde(alias = "lotAreaM2")]
    pub lot_area_m2: f64,
    pub count: u64,
}

impl UnitsByType {
    pub fn from_normalized(product: &NormalizedProduct, count: u64) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            width_m: product.width_m,
            depth_m: product.depth_m,
            lot_area_m2: product.lot_area_m2,
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Areas {
    #[serde(alias = "grossM2")]
    pub gross_m2: f64,
    #[serde(alias = "lotsM2")]
    pub lots_m2: f64,
    #[serde(alias = "roadsM2")]
    pub roads_m2: f64,
    #[serde(alias = "buffersM2")]
    pub buffers_m2: f64,
    #[serde(alias = "amenitiesM2")]
    pub amenities_m2: f64,
    #[serde(alias = "easementsM2")]
    pub easements_m2: f64,
    /// roads + buffers + amenities + easements
    #[serde(alias = "nonSellableM2")]
    pub non_sellable_m2: f64,
}

impl Areas {
    /// Buffers and amenities reported together as open space.
    pub fn open_space_m2(&self) -> f64 {
        self.buffers_m2 + self.amenities_m2
    }

    pub fn fixed_non_sellable_m2(&self) -> f64 {
        self.buffers_m2 + self.amenities_m2 + self.easements_m2
    }
}

/// Percentages of gross area.
///
/// Results saved by earlier releases write a zero-area percentage as `null`;
/// it reads back as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Efficiency {
    #[serde(alias = "netLotToGrossPct", deserialize_with = "null_as_zero")]
    pub net_lot_to_gross_pct: f64,
    #[serde(alias = "roadPct", deserialize_with = "null_as_zero")]
    pub road_pct: f64,
    #[serde(alias = "nonSellablePct", deserialize_with = "null_as_zero")]
    pub non_sellable_pct: f64,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixShare {
    pub id: String,
    pub name: String,
    pub mix: f64,
}

/// How ideal fractional allocations were turned into integer counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingMethod {
    /// Reserved. The solver never produces it.
    #[serde(rename = "nearest")]
    Nearest,
    #[serde(rename = "largest-remainder")]
    LargestRemainder,
}

impl RoundingMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            RoundingMethod::Nearest => "nearest",
            RoundingMethod::LargestRemainder => "largest-remainder",
        }
    }
}

impl fmt::Display for RoundingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NonSellableCategory {
    Roads,
    Buffers,
    Amenities,
    Easements,
}

impl NonSellableCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            NonSellableCategory::Roads => "roads",
            NonSellableCategory::Buffers => "buffers",
            NonSellableCategory::Amenities => "amenities",
            NonSellableCategory::Easements => "easements",
        }
    }
}

impl fmt::Display for NonSellableCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Documentation order of non-sellable categories. Not a computation order.
pub const NON_SELLABLE_ORDERING: [NonSellableCategory; 4] = [
    NonSellableCategory::Roads,
    NonSellableCategory::Buffers,
    NonSellableCategory::Amenities,
    NonSellableCategory::Easements,
];

fn default_non_sellable_ordering() -> [NonSellableCategory; 4] {
    NON_SELLABLE_ORDERING
}

/// Resolved configuration echoed back with every result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    #[serde(alias = "roadCoeffK")]
    pub road_coeff_k: f64,
    #[serde(alias = "rowWidthM")]
    pub row_width_m: f64,
    #[serde(alias = "normalizedMix")]
    pub normalized_mix: Vec<MixShare>,
    #[serde(alias = "roundingMethod")]
    pub rounding_method: RoundingMethod,
    #[serde(
        default = "default_non_sellable_ordering",
        alias = "nonSellableOrdering"
    )]
    pub non_sellable_ordering: [NonSellableCategory; 4],
}

impl Assumptions {
    pub fn new(road_coeff_k: f64, row_width_m: f64, normalized: &[NormalizedProduct]) -> Self {
        Self {
            road_coeff_k,
            row_width_m,
            normalized_mix: normalized
                .iter()
                .map(|p| MixShare {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    mix: p.mix,
                })
                .collect(),
            rounding_method: RoundingMethod::LargestRemainder,
            non_sellable_ordering: NON_SELLABLE_ORDERING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub units: Vec<UnitsByType>,
    pub areas: Areas,
    pub efficiency: Efficiency,
    /// Human-readable warnings in detection order
    #[serde(default)]
    pub warnings: Vec<String>,
    pub assumptions: Assumptions,
}

impl CalculationResult {
    pub fn total_units(&self) -> u64 {
        self.units.iter().map(|u| u.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_non_sellables_default_to_zero() {
        let input = SiteInput {
            gross_area_ha: 1.0,
            row_width_m: 8.0,
            road_coeff_k: None,
            products: vec![],
            non_sellables: Some(NonSellables {
                buffers_m2: Some(120.0),
                amenities_m2: None,
                easements_m2: Some(30.0),
            }),
        };
        let fixed = input.fixed_non_sellables();
        assert_eq!(fixed.amenities_m2, 0.0);
        assert_eq!(fixed.total(), 150.0);
    }

    #[test]
    fn legacy_camel_case_input_is_accepted() {
        let json = r#"{
            "grossAreaHa": 3.0,
            "rowWidthM": 8,
            "roadCoeffK": 1.1,
            "products": [{"id": "p1", "name": "Type A", "widthM": 6, "depthM": 15, "mixPct": 100}],
            "nonSellables": {"buffersM2": 500}
        }"#;
        let input: SiteInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.gross_area_ha, 3.0);
        assert_eq!(input.road_coeff_k, Some(1.1));
        assert_eq!(input.products[0].lot_area_m2(), 90.0);
        assert_eq!(input.fixed_non_sellables().buffers_m2, 500.0);
    }

    #[test]
    fn rounding_method_uses_kebab_tags() {
        let json = serde_json::to_string(&RoundingMethod::LargestRemainder).unwrap();
        assert_eq!(json, "\"largest-remainder\"");
        let back: RoundingMethod = serde_json::from_str("\"nearest\"").unwrap();
        assert_eq!(back, RoundingMethod::Nearest);
    }

    #[test]
    fn null_percentages_read_as_zero() {
        let json = r#"{"netLotToGrossPct": 0, "roadPct": 0, "nonSellablePct": null}"#;
        let efficiency: Efficiency = serde_json::from_str(json).unwrap();
        assert_eq!(efficiency.non_sellable_pct, 0.0);
    }

    #[test]
    fn ordering_serializes_lowercase() {
        let json = serde_json::to_string(&NON_SELLABLE_ORDERING).unwrap();
        assert_eq!(json, r#"["roads","buffers","amenities","easements"]"#);
    }
}
