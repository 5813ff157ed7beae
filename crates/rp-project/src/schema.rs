//! Scenario library schema definitions.

use rp_solver::{CalculationResult, SiteInput};
use serde::{Deserialize, Serialize};

/// One saved scenario: the input as entered and the result it produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioRecord {
    pub id: String,
    pub name: String,
    /// RFC 3339 timestamp
    #[serde(alias = "createdAt")]
    pub created_at: String,
    pub input: SiteInput,
    pub output: CalculationResult,
    /// Fingerprint of input plus solver version that produced `output`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_key: Option<String>,
}

impl ScenarioRecord {
    pub fn total_units(&self) -> u64 {
        self.output.total_units()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioLibrary {
    pub version: u32,
    #[serde(default)]
    pub scenarios: Vec<ScenarioRecord>,
}

impl Default for ScenarioLibrary {
    fn default() -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            scenarios: Vec::new(),
        }
    }
}

impl ScenarioLibrary {
    pub fn get(&self, id: &str) -> Option<&ScenarioRecord> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ScenarioRecord> {
        self.scenarios.iter_mut().find(|s| s.id == id)
    }

    /// Remove a scenario by ID. Returns whether one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.scenarios.len();
        self.scenarios.retain(|s| s.id != id);
        self.scenarios.len() != before
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.iter().map(|s| s.name.as_str())
    }
}
