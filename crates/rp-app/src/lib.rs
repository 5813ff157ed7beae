//! Shared application service layer for resiplot.
//!
//! Front-ends go through this crate for site input files, solving, the
//! scenario library, cached results and comparisons.

pub mod error;
pub mod input_edit;
pub mod input_service;
pub mod query;
pub mod scenario_service;

pub use error::{AppError, AppResult};
pub use input_edit::{
    MoveDirection, add_product, default_site_input, move_product, remove_product,
    set_mix_keep_total,
};
pub use input_service::{load_site_input, save_site_input, solve_site};
pub use query::{ScenarioSummary, summarize_scenario};
pub use scenario_service::{
    ResultOptions, ResultResponse, compare_scenarios, delete_scenario, ensure_result,
    ensure_scenario_result, list_scenarios, load_scenario, rename_scenario, save_scenario,
};
