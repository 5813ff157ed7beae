//! Solver configuration.

/// Business constants and iteration limits used by the solver.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    /// Hard floor for the right-of-way width (m). Smaller inputs are raised to it.
    pub min_row_width_m: f64,
    /// Road coefficient used when the input leaves it unset
    pub default_road_coeff_k: f64,
    /// Lower edge of the advisory road coefficient band
    pub road_coeff_min: f64,
    /// Upper edge of the advisory road coefficient band
    pub road_coeff_max: f64,
    /// Allowed distance of the raw mix total from 100 before warning (percentage points)
    pub mix_sum_tolerance_pct: f64,
    /// Floor applied to the per-unit area cost before dividing by it (m²)
    pub min_unit_cost_m2: f64,
    /// Safety valve for the shrink phase of area balancing
    pub max_shrink_iterations: usize,
    /// Safety valve for the grow phase of area balancing
    pub max_grow_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            min_row_width_m: 4.0,
            default_road_coeff_k: 1.0,
            road_coeff_min: 0.5,
            road_coeff_max: 2.0,
            mix_sum_tolerance_pct: 0.01,
            min_unit_cost_m2: 1e-9,
            max_shrink_iterations: 1000,
            max_grow_iterations: 100,
        }
    }
}
