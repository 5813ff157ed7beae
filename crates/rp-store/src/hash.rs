//! Content-based fingerprints for stored results.

use rp_solver::SiteInput;
use sha2::{Digest, Sha256};

/// Fingerprint of a site input and the solver version that solved it.
///
/// A stored output is current only while its key matches the key of its
/// input under the running solver.
pub fn compute_result_key(input: &SiteInput, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    let input_json = serde_json::to_string(input).unwrap_or_default();
    hasher.update(input_json.as_bytes());
    hasher.update(b"\0");
    hasher.update(solver_version.as_bytes());

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rp_solver::ProductType;

    fn input(gross_area_ha: f64) -> SiteInput {
        SiteInput {
            gross_area_ha,
            row_width_m: 8.0,
            road_coeff_k: Some(1.0),
            products: vec![ProductType::new("p1", "Type A", 6.0, 15.0, 100.0)],
            non_sellables: None,
        }
    }

    #[test]
    fn key_is_stable() {
        let a = compute_result_key(&input(3.0), "0.1.0");
        let b = compute_result_key(&input(3.0), "0.1.0");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn key_tracks_input_and_version() {
        let base = compute_result_key(&input(3.0), "0.1.0");
        assert_ne!(base, compute_result_key(&input(3.5), "0.1.0"));
        assert_ne!(base, compute_result_key(&input(3.0), "0.2.0"));
    }
}
