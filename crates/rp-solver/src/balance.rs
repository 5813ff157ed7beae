//! Area balancing of a discrete unit allocation.
//!
//! The continuous estimate works with mix-weighted averages, while the integer
//! distribution rounds some products up and others down. The realized area can
//! therefore drift from the estimate in either direction. Balancing first
//! shrinks the unit total until the realized area fits, then grows it while
//! another average-cost unit still fits.

use rp_core::units::{in_m2, m};

use crate::config::SolverConfig;
use crate::distribute::distribute_largest_remainder;
use crate::types::NormalizedProduct;

/// Site quantities that stay fixed during balancing.
#[derive(Debug, Clone, Copy)]
pub struct SiteBudget {
    pub gross_m2: f64,
    pub fixed_non_sellable_m2: f64,
    pub row_width_m: f64,
    pub road_coeff_k: f64,
}

/// A unit total with its realized counts and areas.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub total: u64,
    /// Index-aligned with the normalized products
    pub counts: Vec<u64>,
    pub frontage_m: f64,
    pub lots_m2: f64,
    pub roads_m2: f64,
    /// lots + roads + fixed non-sellables
    pub used_m2: f64,
}

impl Allocation {
    /// Distribute `total` units and compute the exact areas they consume.
    pub fn realize(total: u64, products: &[NormalizedProduct], budget: &SiteBudget) -> Self {
        let counts = distribute_largest_remainder(total, products);
        let frontage_m: f64 = products
            .iter()
            .zip(&counts)
            .map(|(p, &c)| c as f64 * p.width_m)
            .sum();
        let lots_m2: f64 = products
            .iter()
            .zip(&counts)
            .map(|(p, &c)| c as f64 * p.lot_area_m2)
            .sum();
        let roads_m2 = in_m2(m(frontage_m) * m(budget.row_width_m)) * budget.road_coeff_k;
        let used_m2 = lots_m2 + roads_m2 + budget.fixed_non_sellable_m2;

        Self {
            total,
            counts,
            frontage_m,
            lots_m2,
            roads_m2,
            used_m2,
        }
    }

    pub fn fits(&self, budget: &SiteBudget) -> bool {
        self.used_m2 <= budget.gross_m2
    }
}

/// What the balancing loops did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceReport {
    pub initial_total: u64,
    pub shrink_iterations: usize,
    pub grow_iterations: usize,
    /// Shrink phase ran out of iterations while the area still overflowed
    pub shrink_cap_reached: bool,
    /// Grow phase ran out of iterations while slack remained
    pub grow_cap_reached: bool,
}

/// Converge an initial unit total to the largest total whose realized area
/// fits the site.
///
/// Both phases are bounded by the iteration caps in `config`. When a cap binds,
/// the last state is returned as is: the shrink phase may leave the area
/// overflowing, the grow phase may leave usable slack.
///
/// The grow phase only accepts a step whose realized area still fits, so a
/// feasible state never turns infeasible while growing.
pub fn balance(
    initial_total: u64,
    products: &[NormalizedProduct],
    budget: &SiteBudget,
    unit_cost_m2: f64,
    config: &SolverConfig,
) -> (Allocation, BalanceReport) {
    let mut report = BalanceReport {
        initial_total,
        ..BalanceReport::default()
    };

    if products.is_empty() {
        return (Allocation::realize(0, products, budget), report);
    }

    let mut alloc = Allocation::realize(initial_total, products, budget);

    while !alloc.fits(budget) && alloc.total > 0 {
        if report.shrink_iterations >= config.max_shrink_iterations {
            report.shrink_cap_reached = true;
            tracing::warn!(
                cap = config.max_shrink_iterations,
                total = alloc.total,
                used_m2 = alloc.used_m2,
                gross_m2 = budget.gross_m2,
                "shrink phase hit its iteration cap"
            );
            break;
        }
        alloc = Allocation::realize(alloc.total - 1, products, budget);
        report.shrink_iterations += 1;
    }

    while alloc.used_m2 + unit_cost_m2 <= budget.gross_m2 {
        if report.grow_iterations >= config.max_grow_iterations {
            report.grow_cap_reached = true;
            tracing::debug!(
                cap = config.max_grow_iterations,
                total = alloc.total,
                "grow phase hit its iteration cap"
            );
            break;
        }
        let Some(next_total) = alloc.total.checked_add(1) else {
            break;
        };
        let candidate = Allocation::realize(next_total, products, budget);
        if !candidate.fits(budget) {
            break;
        }
        alloc = candidate;
        report.grow_iterations += 1;
    }

    tracing::debug!(
        initial = report.initial_total,
        final_total = alloc.total,
        shrink = report.shrink_iterations,
        grow = report.grow_iterations,
        "area balancing finished"
    );

    (alloc, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, width_m: f64, depth_m: f64, mix: f64) -> NormalizedProduct {
        NormalizedProduct {
            id: id.to_string(),
            name: id.to_string(),
            width_m,
            depth_m,
            lot_area_m2: width_m * depth_m,
            mix,
        }
    }

    fn budget(gross_m2: f64) -> SiteBudget {
        SiteBudget {
            gross_m2,
            fixed_non_sellable_m2: 0.0,
            row_width_m: 10.0,
            road_coeff_k: 1.0,
        }
    }

    #[test]
    fn realize_computes_exact_areas() {
        let products = vec![product("a", 6.0, 15.0, 0.5), product("b", 7.0, 15.0, 0.5)];
        let alloc = Allocation::realize(4, &products, &budget(10_000.0));
        assert_eq!(alloc.counts, vec![2, 2]);
        assert_eq!(alloc.frontage_m, 26.0);
        assert_eq!(alloc.lots_m2, 390.0);
        assert_eq!(alloc.roads_m2, 260.0);
        assert_eq!(alloc.used_m2, 650.0);
    }

    #[test]
    fn overflow_shrinks_until_fit() {
        // each unit costs 100 + 10 * 10 = 200 m²
        let products = vec![product("a", 10.0, 10.0, 1.0)];
        let (alloc, report) = balance(12, &products, &budget(1_000.0), 200.0, &SolverConfig::default());
        assert_eq!(alloc.total, 5);
        assert_eq!(report.shrink_iterations, 7);
        assert_eq!(report.grow_iterations, 0);
        assert!(alloc.fits(&budget(1_000.0)));
    }

    #[test]
    fn slack_grows_until_full() {
        let products = vec![product("a", 10.0, 10.0, 1.0)];
        let (alloc, report) = balance(1, &products, &budget(1_000.0), 200.0, &SolverConfig::default());
        assert_eq!(alloc.total, 5);
        assert_eq!(report.grow_iterations, 4);
        assert_eq!(alloc.used_m2, 1_000.0);
    }

    #[test]
    fn grow_rejects_a_step_that_would_overflow() {
        // unit costs 100 and 300 m²; the second unit would land on the large one
        let products = vec![product("small", 5.0, 10.0, 0.5), product("large", 15.0, 10.0, 0.5)];
        let b = budget(350.0);
        let (alloc, _) = balance(0, &products, &b, 200.0, &SolverConfig::default());
        assert_eq!(alloc.counts, vec![1, 0]);
        assert!(alloc.fits(&b));
    }

    #[test]
    fn shrink_cap_leaves_overflow_and_flags_it() {
        let products = vec![product("a", 10.0, 10.0, 1.0)];
        let config = SolverConfig {
            max_shrink_iterations: 3,
            ..SolverConfig::default()
        };
        let (alloc, report) = balance(50, &products, &budget(1_000.0), 200.0, &config);
        assert_eq!(alloc.total, 47);
        assert!(report.shrink_cap_reached);
        assert!(!alloc.fits(&budget(1_000.0)));
    }

    #[test]
    fn grow_cap_stops_early() {
        let products = vec![product("a", 10.0, 10.0, 1.0)];
        let config = SolverConfig {
            max_grow_iterations: 2,
            ..SolverConfig::default()
        };
        let (alloc, report) = balance(0, &products, &budget(1_000.0), 200.0, &config);
        assert_eq!(alloc.total, 2);
        assert!(report.grow_cap_reached);
    }

    #[test]
    fn no_products_means_no_units() {
        let (alloc, report) = balance(0, &[], &budget(1_000.0), 0.0, &SolverConfig::default());
        assert_eq!(alloc.total, 0);
        assert!(alloc.counts.is_empty());
        assert_eq!(report.grow_iterations, 0);
    }
}
