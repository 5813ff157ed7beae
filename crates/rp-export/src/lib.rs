//! rp-export: tabular and printable views of solver results.
//!
//! Exporters only read results; they never recompute anything.

pub mod comparison;
pub mod csv;
pub mod format;
pub mod report;
pub mod workbook;

pub use comparison::{ComparisonItem, MAX_COMPARED, check_comparison};
pub use csv::{sheet_to_csv, write_csv_dir};
pub use report::{LINES_PER_PAGE, Report, comparison_report, scenario_report};
pub use workbook::{Cell, Sheet, Workbook, comparison_workbook, scenario_workbook, to_json};

/// Heading shared by every exported document.
pub const TITLE: &str = "Residential Master Planning Simulator";
pub const SUBTITLE: &str = "Predictive design and yield analysis for residential master planners.";

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Too many scenarios to compare: {count} (max {max})")]
    TooManyScenarios { count: usize, max: usize },

    #[error("Nothing to compare")]
    EmptyComparison,
}
