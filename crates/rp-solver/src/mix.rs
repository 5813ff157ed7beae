//! Product mix normalization.

use rp_core::finite_or_zero;

use crate::config::SolverConfig;
use crate::types::{NormalizedProduct, ProductType};
use crate::warnings::{Warning, WarningLog};

/// Share a product contributes to the mix total. Negative and non-finite
/// percentages count as zero.
fn clamped_mix_pct(p: &ProductType) -> f64 {
    finite_or_zero(p.mix_pct).max(0.0)
}

/// Resolve target percentages into fractions that sum to one.
///
/// A total of zero or less (or one that overflows) is replaced by an even
/// split with a warning. Any other total is rescaled; a total more than
/// `mix_sum_tolerance_pct` away from 100 is reported, but the arithmetic is the
/// same either way.
pub fn normalize_mix(
    products: &[ProductType],
    config: &SolverConfig,
    warnings: &mut WarningLog,
) -> Vec<NormalizedProduct> {
    let total: f64 = products.iter().map(clamped_mix_pct).sum();

    if total <= 0.0 || !total.is_finite() {
        warnings.push(Warning::MixDegenerate);
        let even = 1.0 / products.len().max(1) as f64;
        return products.iter().map(|p| normalized(p, even)).collect();
    }

    if (total - 100.0).abs() > config.mix_sum_tolerance_pct {
        warnings.push(Warning::MixAutoNormalized { total_pct: total });
    }

    products
        .iter()
        .map(|p| normalized(p, clamped_mix_pct(p) / total))
        .collect()
}

fn normalized(p: &ProductType, mix: f64) -> NormalizedProduct {
    NormalizedProduct {
        id: p.id.clone(),
        name: p.name.clone(),
        width_m: p.width_m,
        depth_m: p.depth_m,
        lot_area_m2: p.lot_area_m2(),
        mix,
    }
}

/// Mix-weighted average of a per-product quantity.
pub(crate) fn weighted_average(
    products: &[NormalizedProduct],
    f: impl Fn(&NormalizedProduct) -> f64,
) -> f64 {
    products.iter().map(|p| f(p) * p.mix).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rp_core::{Tolerances, nearly_equal};

    fn product(id: &str, mix_pct: f64) -> ProductType {
        ProductType::new(id, id.to_uppercase(), 6.0, 15.0, mix_pct)
    }

    #[test]
    fn exact_hundred_is_silent() {
        let mut log = WarningLog::new();
        let out = normalize_mix(
            &[product("a", 60.0), product("b", 40.0)],
            &SolverConfig::default(),
            &mut log,
        );
        assert!(log.is_empty());
        assert_eq!(out[0].mix, 0.6);
        assert_eq!(out[1].mix, 0.4);
    }

    #[test]
    fn off_total_is_rescaled_and_reported() {
        let mut log = WarningLog::new();
        let out = normalize_mix(
            &[product("a", 30.0), product("b", 30.0)],
            &SolverConfig::default(),
            &mut log,
        );
        assert_eq!(out[0].mix, 0.5);
        assert_eq!(
            log.entries(),
            &[Warning::MixAutoNormalized { total_pct: 60.0 }]
        );
    }

    #[test]
    fn negative_shares_count_as_zero() {
        let mut log = WarningLog::new();
        let out = normalize_mix(
            &[product("a", -20.0), product("b", 100.0)],
            &SolverConfig::default(),
            &mut log,
        );
        assert_eq!(out[0].mix, 0.0);
        assert_eq!(out[1].mix, 1.0);
        assert!(log.is_empty());
    }

    #[test]
    fn all_zero_is_split_evenly() {
        let mut log = WarningLog::new();
        let out = normalize_mix(
            &[product("a", 0.0), product("b", -5.0), product("c", 0.0)],
            &SolverConfig::default(),
            &mut log,
        );
        for p in &out {
            assert!(nearly_equal(p.mix, 1.0 / 3.0, Tolerances::default()));
        }
        assert_eq!(log.entries(), &[Warning::MixDegenerate]);
    }

    #[test]
    fn nan_share_is_ignored() {
        let mut log = WarningLog::new();
        let out = normalize_mix(
            &[product("a", f64::NAN), product("b", 100.0)],
            &SolverConfig::default(),
            &mut log,
        );
        assert_eq!(out[0].mix, 0.0);
        assert_eq!(out[1].mix, 1.0);
    }

    #[test]
    fn empty_products_report_degenerate_mix() {
        let mut log = WarningLog::new();
        let out = normalize_mix(&[], &SolverConfig::default(), &mut log);
        assert!(out.is_empty());
        assert_eq!(log.entries(), &[Warning::MixDegenerate]);
    }
}
