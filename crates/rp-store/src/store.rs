//! Scenario store API.
//!
//! The whole library lives under a single storage key and is rewritten on
//! every change. Concurrent writers are not coordinated: the last write wins.

use crate::storage::{FileStorage, KeyValueStorage};
use crate::{StoreError, StoreResult};
use rp_project::{ScenarioLibrary, ScenarioRecord, library_to_json, parse_library};
use std::path::PathBuf;

/// Storage key holding the scenario library.
pub const STORAGE_KEY: &str = "resiplot_scenarios_v1";

/// Copy of stored content that could not be loaded in full, taken before the
/// next write replaces it. Each such write replaces the previous copy.
pub const BACKUP_KEY: &str = "resiplot_scenarios_v1.corrupt";

#[derive(Debug, Clone)]
pub struct ScenarioStore<S> {
    storage: S,
}

impl ScenarioStore<FileStorage> {
    /// Store backed by files under `root_dir`, created if needed.
    pub fn open(root_dir: PathBuf) -> StoreResult<Self> {
        Ok(Self::new(FileStorage::new(root_dir)?))
    }
}

impl<S: KeyValueStorage> ScenarioStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the stored library.
    ///
    /// Unreadable content is skipped, never returned as an error. Records
    /// that fail to parse, migrate or validate are left out one by one. A
    /// value that is not a library at all (malformed JSON, a scalar, a
    /// version newer than this build understands) loads as an empty library.
    /// Only storage I/O errors are returned.
    pub fn load_library(&self) -> StoreResult<ScenarioLibrary> {
        Ok(self.snapshot()?.library)
    }

    pub fn load_scenarios(&self) -> StoreResult<Vec<ScenarioRecord>> {
        Ok(self.load_library()?.scenarios)
    }

    /// Replace the stored list with `scenarios`.
    pub fn save_scenarios(&mut self, scenarios: Vec<ScenarioRecord>) -> StoreResult<()> {
        let library = ScenarioLibrary {
            scenarios,
            ..ScenarioLibrary::default()
        };
        self.save_library(&library)
    }

    /// Write `library` over the stored one.
    ///
    /// Stored content that did not load in full is first copied to
    /// [`BACKUP_KEY`].
    pub fn save_library(&mut self, library: &ScenarioLibrary) -> StoreResult<()> {
        let json = library_to_json(library)?;
        self.load_for_write()?;
        self.write_json(&json, library.scenarios.len())
    }

    pub fn append(&mut self, record: ScenarioRecord) -> StoreResult<()> {
        let mut library = self.load_for_write()?;
        if library.get(&record.id).is_some() {
            return Err(StoreError::DuplicateScenario { id: record.id });
        }
        library.scenarios.push(record);
        self.write_library(&library)
    }

    pub fn get(&self, id: &str) -> StoreResult<Option<ScenarioRecord>> {
        Ok(self.load_library()?.get(id).cloned())
    }

    /// Remove a scenario. Returns whether it existed.
    pub fn delete(&mut self, id: &str) -> StoreResult<bool> {
        let mut library = self.load_for_write()?;
        if !library.remove(id) {
            return Ok(false);
        }
        self.write_library(&library)?;
        Ok(true)
    }

    pub fn rename(&mut self, id: &str, name: &str) -> StoreResult<ScenarioRecord> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::BlankName);
        }
        let mut library = self.load_for_write()?;
        let record = library
            .get_mut(id)
            .ok_or_else(|| StoreError::ScenarioNotFound { id: id.to_string() })?;
        record.name = name.to_string();
        let renamed = record.clone();
        self.write_library(&library)?;
        Ok(renamed)
    }

    fn snapshot(&self) -> StoreResult<Snapshot> {
        let Some(raw) = self.storage.get(STORAGE_KEY)? else {
            return Ok(Snapshot {
                library: ScenarioLibrary::default(),
                unreadable: None,
            });
        };
        match parse_library(&raw) {
            Ok(loaded) => {
                for skipped in &loaded.skipped {
                    tracing::warn!(
                        key = STORAGE_KEY,
                        index = skipped.index,
                        reason = %skipped.reason,
                        "skipping unreadable scenario record"
                    );
                }
                let unreadable = (!loaded.is_complete()).then_some(raw);
                Ok(Snapshot {
                    library: loaded.library,
                    unreadable,
                })
            }
            Err(err) => {
                tracing::warn!(key = STORAGE_KEY, error = %err, "discarding unreadable scenario library");
                Ok(Snapshot {
                    library: ScenarioLibrary::default(),
                    unreadable: Some(raw),
                })
            }
        }
    }

    /// The library about to be rewritten, with any unreadable stored content
    /// copied aside first.
    fn load_for_write(&mut self) -> StoreResult<ScenarioLibrary> {
        let snapshot = self.snapshot()?;
        if let Some(raw) = snapshot.unreadable {
            self.storage.set(BACKUP_KEY, &raw)?;
            tracing::warn!(
                key = STORAGE_KEY,
                backup = BACKUP_KEY,
                "copied unreadable scenario data before overwriting it"
            );
        }
        Ok(snapshot.library)
    }

    fn write_library(&mut self, library: &ScenarioLibrary) -> StoreResult<()> {
        let json = library_to_json(library)?;
        self.write_json(&json, library.scenarios.len())
    }

    fn write_json(&mut self, json: &str, count: usize) -> StoreResult<()> {
        self.storage.set(STORAGE_KEY, json)?;
        tracing::debug!(count, "scenario library written");
        Ok(())
    }
}

/// What a read found under [`STORAGE_KEY`].
struct Snapshot {
    library: ScenarioLibrary,
    /// Raw stored text, kept when some of it could not be loaded
    unreadable: Option<String>,
}
