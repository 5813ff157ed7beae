//! Scenario solver for residential land-use planning.
//!
//! Turns a site description (gross area, right-of-way width, a mix of lot
//! product types and fixed non-sellable areas) into a discrete unit
//! allocation per product type, an area breakdown and efficiency ratios.
//!
//! The solver is total: every input the types can describe produces a
//! complete [`CalculationResult`]. Anomalies are reported as ordered,
//! human-readable warnings on the result instead of errors.

pub mod balance;
pub mod config;
pub mod distribute;
pub mod mix;
pub mod solve;
pub mod types;
pub mod warnings;

pub use balance::{Allocation, BalanceReport, SiteBudget};
pub use config::SolverConfig;
pub use distribute::distribute_largest_remainder;
pub use mix::normalize_mix;
pub use solve::{SOLVER_VERSION, solve, solve_with_config};
pub use types::*;
pub use warnings::{Warning, WarningLog};
