//! Schema migration framework.

use crate::ProjectError;
use crate::naming::next_scenario_name;
use crate::schema::ScenarioLibrary;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut library: ScenarioLibrary) -> Result<ScenarioLibrary, ProjectError> {
    while library.version < LATEST_VERSION {
        library = migrate_one_version(library)?;
    }
    Ok(library)
}

fn migrate_one_version(library: ScenarioLibrary) -> Result<ScenarioLibrary, ProjectError> {
    match library.version {
        0 => migrate_v0_to_v1(library),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 is the bare array written by the first release. Its records
/// could carry blank names and IDs.
fn migrate_v0_to_v1(mut library: ScenarioLibrary) -> Result<ScenarioLibrary, ProjectError> {
    for idx in 0..library.scenarios.len() {
        if library.scenarios[idx].id.trim().is_empty() {
            library.scenarios[idx].id = uuid::Uuid::new_v4().to_string();
        }
        if library.scenarios[idx].name.trim().is_empty() {
            let name = next_scenario_name(library.names());
            library.scenarios[idx].name = name;
        }
    }

    library.version = 1;
    Ok(library)
}
