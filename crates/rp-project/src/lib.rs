//! rp-project: scenario library format, site input files and validation.

pub mod migrate;
pub mod naming;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use naming::{SCENARIO_NAME_BASE, next_scenario_name};
pub use schema::*;
pub use validate::{ValidationError, validate_library, validate_record, validate_site_input};

use rp_solver::SiteInput;
use std::collections::HashSet;
use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Unrecognized stored value: {what}")]
    Shape { what: String },

    #[error("Unsupported file format: {path} (expected .yaml, .yml or .json)")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> ProjectResult<FileFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
        Some("json") => Ok(FileFormat::Json),
        _ => Err(ProjectError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// Load a site input from a YAML or JSON file, chosen by extension.
pub fn load_site_input(path: &Path) -> ProjectResult<SiteInput> {
    let format = format_of(path)?;
    let content = std::fs::read_to_string(path)?;
    let input: SiteInput = match format {
        FileFormat::Yaml => serde_yaml::from_str(&content)?,
        FileFormat::Json => serde_json::from_str(&content)?,
    };
    validate_site_input(&input)?;
    Ok(input)
}

pub fn save_site_input(path: &Path, input: &SiteInput) -> ProjectResult<()> {
    validate_site_input(input)?;
    let content = match format_of(path)? {
        FileFormat::Yaml => serde_yaml::to_string(input)?,
        FileFormat::Json => serde_json::to_string_pretty(input)?,
    };
    std::fs::write(path, content)?;
    Ok(())
}

/// A stored library read record by record.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedLibrary {
    pub library: ScenarioLibrary,
    /// Records left out, in stored order
    pub skipped: Vec<SkippedRecord>,
}

impl LoadedLibrary {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// Position in the stored scenario array
    pub index: usize,
    pub reason: String,
}

/// Parse a stored library value, upgrade it and validate it.
///
/// Accepts the current `{ version, scenarios }` object and the legacy bare
/// array of records (version 0).
///
/// Each record is read, migrated and validated on its own. A record that
/// fails any step is left out and reported in `skipped`; a later record
/// repeating an earlier ID is skipped as well. Only a value that is not a
/// library at all is an error: malformed JSON, a scalar, an object without a
/// version or with a non-array `scenarios`, or a version newer than
/// [`LATEST_VERSION`].
pub fn parse_library(raw: &str) -> ProjectResult<LoadedLibrary> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let (version, entries) = library_parts(value)?;
    if version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion { version }.into());
    }

    let mut skipped = Vec::new();
    let mut positions = Vec::with_capacity(entries.len());
    let mut scenarios = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<ScenarioRecord>(entry) {
            Ok(record) => {
                positions.push(index);
                scenarios.push(record);
            }
            Err(err) => skipped.push(SkippedRecord {
                index,
                reason: err.to_string(),
            }),
        }
    }

    let migrated = migrate_to_latest(ScenarioLibrary { version, scenarios })?;

    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(migrated.scenarios.len());
    for (index, record) in positions.into_iter().zip(migrated.scenarios) {
        let checked = validate_record(&record).and_then(|()| {
            if seen.contains(&record.id) {
                Err(ValidationError::DuplicateId {
                    id: record.id.clone(),
                    context: "scenarios".to_string(),
                })
            } else {
                Ok(())
            }
        });
        match checked {
            Ok(()) => {
                seen.insert(record.id.clone());
                kept.push(record);
            }
            Err(err) => skipped.push(SkippedRecord {
                index,
                reason: err.to_string(),
            }),
        }
    }
    skipped.sort_by_key(|s| s.index);

    Ok(LoadedLibrary {
        library: ScenarioLibrary {
            version: migrated.version,
            scenarios: kept,
        },
        skipped,
    })
}

fn library_parts(value: serde_json::Value) -> ProjectResult<(u32, Vec<serde_json::Value>)> {
    match value {
        serde_json::Value::Array(entries) => Ok((0, entries)),
        serde_json::Value::Object(mut map) => {
            let version = match map.remove("version") {
                Some(v) => serde_json::from_value::<u32>(v)?,
                None => {
                    return Err(ProjectError::Shape {
                        what: "library object without a version".to_string(),
                    });
                }
            };
            let entries = match map.remove("scenarios") {
                None => Vec::new(),
                Some(serde_json::Value::Array(entries)) => entries,
                Some(other) => {
                    return Err(ProjectError::Shape {
                        what: format!("expected a scenario array, found {}", json_kind(&other)),
                    });
                }
            };
            Ok((version, entries))
        }
        other => Err(ProjectError::Shape {
            what: format!("expected an array or object, found {}", json_kind(&other)),
        }),
    }
}

pub fn library_to_json(library: &ScenarioLibrary) -> ProjectResult<String> {
    validate_library(library)?;
    Ok(serde_json::to_string(library)?)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
