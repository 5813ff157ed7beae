//! Site input files and solving.

use rp_solver::{CalculationResult, SiteInput};
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Load a site input from a `.yaml`, `.yml` or `.json` file.
pub fn load_site_input(path: &Path) -> AppResult<SiteInput> {
    rp_project::load_site_input(path).map_err(|e| AppError::InputFileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn save_site_input(path: &Path, input: &SiteInput) -> AppResult<()> {
    rp_project::save_site_input(path, input).map_err(|e| AppError::InputFileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Solve a site input with the default solver configuration.
pub fn solve_site(input: &SiteInput) -> CalculationResult {
    let result = rp_solver::solve(input);
    for warning in &result.warnings {
        tracing::info!(%warning, "solver warning");
    }
    tracing::debug!(units = result.total_units(), "site solved");
    result
}
