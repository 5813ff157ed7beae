//! High-level solver interface.

use rp_core::percent_of;
use rp_core::units::ha_to_m2;

use crate::balance::{BalanceReport, SiteBudget, balance};
use crate::config::SolverConfig;
use crate::mix::{normalize_mix, weighted_average};
use crate::types::{
    Areas, Assumptions, CalculationResult, Efficiency, FixedNonSellables, NormalizedProduct,
    SiteInput, UnitsByType,
};
use crate::warnings::{Warning, WarningLog};

/// Version tag of the solving algorithm, recorded with persisted results.
pub const SOLVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Solve a site with the default configuration.
///
/// See [`solve_with_config`].
pub fn solve(input: &SiteInput) -> CalculationResult {
    solve_with_config(input, &SolverConfig::default())
}

/// Solve a site for the number of lots of each product type.
///
/// This function:
/// 1. Converts the gross area from hectares to m²
/// 2. Raises the ROW width to the configured floor
/// 3. Resolves the road coefficient and flags values outside the usual band
/// 4. Normalizes the product mix
/// 5. Short-circuits when fixed non-sellables take the whole site
/// 6. Estimates the unit total from mix-weighted averages
/// 7. Distributes units by largest remainder and balances the realized area
///
/// Never fails. Anomalies are returned as warnings in detection order.
pub fn solve_with_config(input: &SiteInput, config: &SolverConfig) -> CalculationResult {
    let mut warnings = WarningLog::new();

    let gross_m2 = ha_to_m2(input.gross_area_ha);
    let row_width_m = clamp_row_width(input.row_width_m, config, &mut warnings);
    let road_coeff_k = resolve_road_coeff(input.road_coeff_k, config, &mut warnings);
    let normalized = normalize_mix(&input.products, config, &mut warnings);
    let fixed = input.fixed_non_sellables();
    let assumptions = Assumptions::new(road_coeff_k, row_width_m, &normalized);

    if fixed.total() >= gross_m2 {
        warnings.push(Warning::NoCapacity);
        return no_capacity_result(gross_m2, fixed, &normalized, warnings, assumptions);
    }

    let avg_lot_area_m2 = weighted_average(&normalized, |p| p.lot_area_m2);
    let avg_width_m = weighted_average(&normalized, |p| p.width_m);
    let unit_cost_m2 = avg_lot_area_m2 + avg_width_m * row_width_m * road_coeff_k;

    let initial_total = if normalized.is_empty() {
        0
    } else {
        initial_unit_estimate(gross_m2 - fixed.total(), unit_cost_m2, config)
    };
    tracing::debug!(
        gross_m2,
        unit_cost_m2,
        initial_total,
        "continuous capacity estimate"
    );

    let budget = SiteBudget {
        gross_m2,
        fixed_non_sellable_m2: fixed.total(),
        row_width_m,
        road_coeff_k,
    };
    let (alloc, report) = balance(initial_total, &normalized, &budget, unit_cost_m2, config);
    note_cap(&report, &mut warnings);

    let units: Vec<UnitsByType> = normalized
        .iter()
        .zip(&alloc.counts)
        .map(|(p, &count)| UnitsByType::from_normalized(p, count))
        .collect();

    let non_sellable_m2 =
        alloc.roads_m2 + fixed.buffers_m2 + fixed.amenities_m2 + fixed.easements_m2;

    CalculationResult {
        units,
        areas: Areas {
            gross_m2,
            lots_m2: alloc.lots_m2,
            roads_m2: alloc.roads_m2,
            buffers_m2: fixed.buffers_m2,
            amenities_m2: fixed.amenities_m2,
            easements_m2: fixed.easements_m2,
            non_sellable_m2,
        },
        efficiency: Efficiency {
            net_lot_to_gross_pct: percent_of(alloc.lots_m2, gross_m2),
            road_pct: percent_of(alloc.roads_m2, gross_m2),
            non_sellable_pct: percent_of(non_sellable_m2, gross_m2),
        },
        warnings: warnings.into_messages(),
        assumptions,
    }
}

/// A NaN width counts as below the floor.
fn clamp_row_width(row_width_m: f64, config: &SolverConfig, warnings: &mut WarningLog) -> f64 {
    if row_width_m >= config.min_row_width_m {
        return row_width_m;
    }
    warnings.push(Warning::RowWidthClamped {
        given_m: row_width_m,
        min_m: config.min_row_width_m,
    });
    config.min_row_width_m
}

/// Out-of-band values are flagged, not changed. A non-finite value cannot
/// size roads; it is flagged as such and the default is used.
fn resolve_road_coeff(k: Option<f64>, config: &SolverConfig, warnings: &mut WarningLog) -> f64 {
    let k = k.unwrap_or(config.default_road_coeff_k);
    if !k.is_finite() {
        warnings.push(Warning::RoadCoeffNonFinite {
            k,
            fallback: config.default_road_coeff_k,
        });
        return config.default_road_coeff_k;
    }
    if !(config.road_coeff_min..=config.road_coeff_max).contains(&k) {
        warnings.push(Warning::RoadCoeffUnusual { k });
    }
    k
}

fn initial_unit_estimate(available_m2: f64, unit_cost_m2: f64, config: &SolverConfig) -> u64 {
    let estimate = (available_m2 / unit_cost_m2.max(config.min_unit_cost_m2)).floor();
    if estimate.is_nan() || estimate <= 0.0 {
        0
    } else {
        // saturating cast
        estimate as u64
    }
}

fn note_cap(report: &BalanceReport, warnings: &mut WarningLog) {
    if report.shrink_cap_reached {
        warnings.push(Warning::BalanceCapReached {
            iterations: report.shrink_iterations,
        });
    }
}

fn no_capacity_result(
    gross_m2: f64,
    fixed: FixedNonSellables,
    normalized: &[NormalizedProduct],
    warnings: WarningLog,
    assumptions: Assumptions,
) -> CalculationResult {
    let non_sellable_m2 = fixed.total();
    CalculationResult {
        units: normalized
            .iter()
            .map(|p| UnitsByType::from_normalized(p, 0))
            .collect(),
        areas: Areas {
            gross_m2,
            lots_m2: 0.0,
            roads_m2: 0.0,
            buffers_m2: fixed.buffers_m2,
            amenities_m2: fixed.amenities_m2,
            easements_m2: fixed.easements_m2,
            non_sellable_m2,
        },
        efficiency: Efficiency {
            net_lot_to_gross_pct: 0.0,
            road_pct: 0.0,
            non_sellable_pct: percent_of(non_sellable_m2, gross_m2),
        },
        warnings: warnings.into_messages(),
        assumptions,
    }
}
