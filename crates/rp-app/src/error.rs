//! Error types for the rp-app service layer.

use std::path::PathBuf;

/// Application error wrapping the backend crates' errors for every front-end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read site input: {path}")]
    InputFileRead {
        path: PathBuf,
        source: rp_project::ProjectError,
    },

    #[error("Failed to write site input: {path}")]
    InputFileWrite {
        path: PathBuf,
        source: rp_project::ProjectError,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Storage error: {0}")]
    Store(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rp-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<rp_project::ProjectError> for AppError {
    fn from(err: rp_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<rp_project::ValidationError> for AppError {
    fn from(err: rp_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<rp_store::StoreError> for AppError {
    fn from(err: rp_store::StoreError) -> Self {
        match err {
            rp_store::StoreError::ScenarioNotFound { id } => AppError::ScenarioNotFound(id),
            other => AppError::Store(other.to_string()),
        }
    }
}

impl From<rp_export::ExportError> for AppError {
    fn from(err: rp_export::ExportError) -> Self {
        AppError::Export(err.to_string())
    }
}

impl From<rp_core::RpError> for AppError {
    fn from(err: rp_core::RpError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
