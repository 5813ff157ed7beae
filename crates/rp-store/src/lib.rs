//! rp-store: key-value persistence for saved scenarios.

pub mod hash;
pub mod storage;
pub mod store;

pub use hash::compute_result_key;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{BACKUP_KEY, STORAGE_KEY, ScenarioStore};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Project error: {0}")]
    Project(#[from] rp_project::ProjectError),

    #[error("Invalid storage key: {key}")]
    InvalidKey { key: String },

    #[error("Scenario not found: {id}")]
    ScenarioNotFound { id: String },

    #[error("Duplicate scenario ID: {id}")]
    DuplicateScenario { id: String },

    #[error("Scenario name must not be blank")]
    BlankName,
}
