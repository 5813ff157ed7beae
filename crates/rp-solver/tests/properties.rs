use proptest::prelude::*;
use rp_core::{Tolerances, nearly_equal};
use rp_solver::*;

fn product_strategy() -> impl Strategy<Value = (f64, f64, f64)> {
    (3.0_f64..20.0, 10.0_f64..40.0, -20.0_f64..100.0)
}

fn site_strategy() -> impl Strategy<Value = SiteInput> {
    (
        0.1_f64..20.0,
        0.0_f64..20.0,
        prop::option::of(0.3_f64..2.5),
        prop::collection::vec(product_strategy(), 1..6),
        prop::option::of(0.0_f64..40_000.0),
    )
        .prop_map(|(gross_area_ha, row_width_m, road_coeff_k, specs, buffers)| SiteInput {
            gross_area_ha,
            row_width_m,
            road_coeff_k,
            products: specs
                .into_iter()
                .enumerate()
                .map(|(i, (w, d, mix))| ProductType::new(format!("p{i}"), format!("Type {i}"), w, d, mix))
                .collect(),
            non_sellables: buffers.map(|b| NonSellables {
                buffers_m2: Some(b),
                amenities_m2: None,
                easements_m2: None,
            }),
        })
}

proptest! {
    #[test]
    fn normalized_mix_sums_to_one(input in site_strategy()) {
        let result = solve(&input);
        let sum: f64 = result.assumptions.normalized_mix.iter().map(|m| m.mix).sum();
        let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
        prop_assert!(nearly_equal(sum, 1.0, tol));
        prop_assert!(result.assumptions.normalized_mix.iter().all(|m| (0.0..=1.0).contains(&m.mix)));
    }

    #[test]
    fn realized_areas_never_overflow(input in site_strategy()) {
        let result = solve(&input);
        let a = &result.areas;
        if a.fixed_non_sellable_m2() < a.gross_m2 {
            prop_assert!(a.lots_m2 + a.roads_m2 + a.fixed_non_sellable_m2() <= a.gross_m2);
            prop_assert!(a.lots_m2 + a.non_sellable_m2 <= a.gross_m2 + 1e-6);
        }
    }

    #[test]
    fn non_sellable_total_adds_up(input in site_strategy()) {
        let a = solve(&input).areas;
        prop_assert_eq!(a.non_sellable_m2, a.roads_m2 + a.buffers_m2 + a.amenities_m2 + a.easements_m2);
    }

    #[test]
    fn counts_match_distribution_of_total(input in site_strategy()) {
        let result = solve(&input);
        let mut log = WarningLog::new();
        let normalized = normalize_mix(&input.products, &SolverConfig::default(), &mut log);
        let counts: Vec<u64> = result.units.iter().map(|u| u.count).collect();
        prop_assert_eq!(counts, distribute_largest_remainder(result.total_units(), &normalized));
    }

    #[test]
    fn solving_is_idempotent(input in site_strategy()) {
        prop_assert_eq!(solve(&input), solve(&input));
    }

    #[test]
    fn row_width_clamp_is_monotonic(input in site_strategy()) {
        let result = solve(&input);
        let clamp_warned = result.warnings.iter().any(|w| w.starts_with("ROW width"));
        if input.row_width_m < 4.0 {
            prop_assert_eq!(result.assumptions.row_width_m, 4.0);
            prop_assert!(clamp_warned);
        } else {
            prop_assert_eq!(result.assumptions.row_width_m, input.row_width_m);
            prop_assert!(!clamp_warned);
        }
    }

    #[test]
    fn infeasible_sites_are_zeroed(gross_area_ha in 0.01_f64..5.0, extra in 0.0_f64..1_000.0) {
        let gross_m2 = gross_area_ha * 10_000.0;
        let input = SiteInput {
            gross_area_ha,
            row_width_m: 8.0,
            road_coeff_k: None,
            products: vec![ProductType::new("p1", "Type A", 6.0, 15.0, 100.0)],
            non_sellables: Some(NonSellables {
                buffers_m2: Some(gross_m2 / 2.0),
                amenities_m2: Some(gross_m2 / 2.0 + extra),
                easements_m2: None,
            }),
        };
        let result = solve(&input);
        let fixed = gross_m2 / 2.0 + (gross_m2 / 2.0 + extra);
        prop_assert_eq!(result.total_units(), 0);
        prop_assert_eq!(result.areas.lots_m2, 0.0);
        prop_assert_eq!(result.areas.roads_m2, 0.0);
        prop_assert_eq!(result.efficiency.non_sellable_pct, fixed / gross_m2 * 100.0);
    }

    #[test]
    fn distribution_always_sums_to_total(
        total in 0u64..100_000,
        raw in prop::collection::vec(0.0_f64..10.0, 1..8),
    ) {
        let sum: f64 = raw.iter().sum();
        let products: Vec<NormalizedProduct> = raw
            .iter()
            .enumerate()
            .map(|(i, &r)| NormalizedProduct {
                id: format!("p{i}"),
                name: format!("Type {i}"),
                width_m: 6.0,
                depth_m: 15.0,
                lot_area_m2: 90.0,
                mix: if sum > 0.0 { r / sum } else { 1.0 / raw.len() as f64 },
            })
            .collect();
        let counts = distribute_largest_remainder(total, &products);
        prop_assert_eq!(counts.iter().sum::<u64>(), total);
    }
}
