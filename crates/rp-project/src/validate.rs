//! Scenario library and site input validation.
//!
//! Validation checks shape, not planning rules: out-of-range values such as a
//! narrow ROW are the solver's business and come back as warnings.

use crate::schema::{ScenarioLibrary, ScenarioRecord};
use rp_core::ensure_finite;
use rp_solver::SiteInput;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing value: {field} in {context}")]
    Missing { field: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_library(library: &ScenarioLibrary) -> Result<(), ValidationError> {
    if library.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: library.version,
        });
    }

    let mut scenario_ids = HashSet::new();
    for scenario in &library.scenarios {
        validate_record(scenario)?;
        if !scenario_ids.insert(&scenario.id) {
            return Err(ValidationError::DuplicateId {
                id: scenario.id.clone(),
                context: "scenarios".to_string(),
            });
        }
    }

    Ok(())
}

/// Checks on a single saved scenario, independent of its neighbours.
pub fn validate_record(scenario: &ScenarioRecord) -> Result<(), ValidationError> {
    if scenario.id.trim().is_empty() {
        return Err(ValidationError::Missing {
            field: "id".to_string(),
            context: format!("scenario '{}'", scenario.name),
        });
    }
    if scenario.name.trim().is_empty() {
        return Err(ValidationError::Missing {
            field: "name".to_string(),
            context: format!("scenario '{}'", scenario.id),
        });
    }
    validate_site_input(&scenario.input)
}

pub fn validate_site_input(input: &SiteInput) -> Result<(), ValidationError> {
    finite(input.gross_area_ha, "gross_area_ha")?;
    finite(input.row_width_m, "row_width_m")?;
    if let Some(k) = input.road_coeff_k {
        finite(k, "road_coeff_k")?;
    }

    // Product ids may repeat: counts are index-aligned with the product list.
    for product in &input.products {
        if product.id.trim().is_empty() {
            return Err(ValidationError::Missing {
                field: "id".to_string(),
                context: format!("product '{}'", product.name),
            });
        }
        finite(product.width_m, "width_m")?;
        finite(product.depth_m, "depth_m")?;
        finite(product.mix_pct, "mix_pct")?;
    }

    if let Some(n) = &input.non_sellables {
        for (value, field) in [
            (n.buffers_m2, "buffers_m2"),
            (n.amenities_m2, "amenities_m2"),
            (n.easements_m2, "easements_m2"),
        ] {
            if let Some(v) = value {
                finite(v, field)?;
            }
        }
    }

    Ok(())
}

fn finite(value: f64, field: &'static str) -> Result<f64, ValidationError> {
    ensure_finite(value, field).map_err(|e| ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rp_solver::{NonSellables, ProductType, solve};

    fn input() -> SiteInput {
        SiteInput {
            gross_area_ha: 2.0,
            row_width_m: 8.0,
            road_coeff_k: Some(1.0),
            products: vec![
                ProductType::new("p1", "Type A", 6.0, 15.0, 50.0),
                ProductType::new("p2", "Type B", 7.0, 15.0, 50.0),
            ],
            non_sellables: None,
        }
    }

    fn record(id: &str) -> ScenarioRecord {
        let input = input();
        let output = solve(&input);
        ScenarioRecord {
            id: id.to_string(),
            name: format!("Scenario {id}"),
            created_at: "2026-01-05T09:30:00Z".to_string(),
            input,
            output,
            result_key: None,
        }
    }

    #[test]
    fn valid_input_passes() {
        validate_site_input(&input()).unwrap();
    }

    #[test]
    fn narrow_row_is_not_a_validation_error() {
        let mut i = input();
        i.row_width_m = 1.0;
        validate_site_input(&i).unwrap();
    }

    #[test]
    fn nan_gross_area_is_rejected() {
        let mut i = input();
        i.gross_area_ha = f64::NAN;
        let err = validate_site_input(&i).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "gross_area_ha"));
    }

    #[test]
    fn infinite_easement_is_rejected() {
        let mut i = input();
        i.non_sellables = Some(NonSellables {
            buffers_m2: None,
            amenities_m2: None,
            easements_m2: Some(f64::INFINITY),
        });
        assert!(validate_site_input(&i).is_err());
    }

    #[test]
    fn duplicate_product_ids_are_accepted() {
        let mut i = input();
        i.products[1].id = "p1".to_string();
        validate_site_input(&i).unwrap();
    }

    #[test]
    fn blank_product_id_is_rejected() {
        let mut i = input();
        i.products[0].id = " ".to_string();
        assert!(matches!(
            validate_site_input(&i),
            Err(ValidationError::Missing { .. })
        ));
    }

    #[test]
    fn duplicate_scenario_ids_are_rejected() {
        let library = ScenarioLibrary {
            version: 1,
            scenarios: vec![record("a"), record("a")],
        };
        assert!(matches!(
            validate_library(&library),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn future_version_is_rejected() {
        let library = ScenarioLibrary {
            version: 99,
            scenarios: vec![],
        };
        assert!(matches!(
            validate_library(&library),
            Err(ValidationError::UnsupportedVersion { version: 99 })
        ));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut r = record("a");
        r.name = " ".to_string();
        let library = ScenarioLibrary {
            version: 1,
            scenarios: vec![r],
        };
        assert!(matches!(
            validate_library(&library),
            Err(ValidationError::Missing { .. })
        ));
    }
}
