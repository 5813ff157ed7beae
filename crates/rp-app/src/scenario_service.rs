//! Scenario library service: saving, listing, cached results, comparison.

use rp_export::{ComparisonItem, MAX_COMPARED};
use rp_project::{ScenarioRecord, next_scenario_name, validate_site_input};
use rp_solver::{CalculationResult, SOLVER_VERSION, SiteInput};
use rp_store::{KeyValueStorage, ScenarioStore, compute_result_key};

use crate::error::{AppError, AppResult};
use crate::input_service::solve_site;

/// Options for resolving a scenario's result.
#[derive(Debug, Clone)]
pub struct ResultOptions {
    pub use_cache: bool,
    pub solver_version: String,
}

impl Default for ResultOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            solver_version: SOLVER_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResultResponse {
    pub output: CalculationResult,
    pub result_key: String,
    pub loaded_from_cache: bool,
}

/// Solve `input` and append it to the library as a new scenario.
///
/// A missing or blank name is replaced by the next free default name.
pub fn save_scenario<S: KeyValueStorage>(
    store: &mut ScenarioStore<S>,
    name: Option<&str>,
    input: &SiteInput,
) -> AppResult<ScenarioRecord> {
    validate_site_input(input)?;

    let existing = store.load_scenarios()?;
    let name = match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => next_scenario_name(existing.iter().map(|s| s.name.as_str())),
    };

    let output = solve_site(input);
    let record = ScenarioRecord {
        id: uuid::Uuid::new_v4().to_string(),
        name,
        created_at: chrono::Utc::now().to_rfc3339(),
        input: input.clone(),
        output,
        result_key: Some(compute_result_key(input, SOLVER_VERSION)),
    };

    store.append(record.clone())?;
    tracing::info!(id = %record.id, name = %record.name, units = record.total_units(), "scenario saved");
    Ok(record)
}

/// All saved scenarios, oldest first.
pub fn list_scenarios<S: KeyValueStorage>(store: &ScenarioStore<S>) -> AppResult<Vec<ScenarioRecord>> {
    Ok(store.load_scenarios()?)
}

pub fn load_scenario<S: KeyValueStorage>(
    store: &ScenarioStore<S>,
    id: &str,
) -> AppResult<ScenarioRecord> {
    store
        .get(id)?
        .ok_or_else(|| AppError::ScenarioNotFound(id.to_string()))
}

pub fn delete_scenario<S: KeyValueStorage>(store: &mut ScenarioStore<S>, id: &str) -> AppResult<()> {
    if !store.delete(id)? {
        return Err(AppError::ScenarioNotFound(id.to_string()));
    }
    tracing::info!(id, "scenario deleted");
    Ok(())
}

pub fn rename_scenario<S: KeyValueStorage>(
    store: &mut ScenarioStore<S>,
    id: &str,
    name: &str,
) -> AppResult<ScenarioRecord> {
    Ok(store.rename(id, name)?)
}

/// Stored output when it is current, otherwise a fresh solve.
///
/// A stored output is current when the record's result key equals the key of
/// its input under `options.solver_version`.
pub fn ensure_result(record: &ScenarioRecord, options: &ResultOptions) -> ResultResponse {
    let result_key = compute_result_key(&record.input, &options.solver_version);

    if options.use_cache && record.result_key.as_deref() == Some(result_key.as_str()) {
        return ResultResponse {
            output: record.output.clone(),
            result_key,
            loaded_from_cache: true,
        };
    }

    tracing::debug!(id = %record.id, "stored result is stale, re-solving");
    ResultResponse {
        output: solve_site(&record.input),
        result_key,
        loaded_from_cache: false,
    }
}

/// [`ensure_result`] for a stored scenario, writing a refreshed result back.
pub fn ensure_scenario_result<S: KeyValueStorage>(
    store: &mut ScenarioStore<S>,
    id: &str,
    options: &ResultOptions,
) -> AppResult<ResultResponse> {
    let mut library = store.load_library()?;
    let record = library
        .get_mut(id)
        .ok_or_else(|| AppError::ScenarioNotFound(id.to_string()))?;

    let response = ensure_result(record, options);
    if !response.loaded_from_cache {
        record.output = response.output.clone();
        record.result_key = Some(response.result_key.clone());
        store.save_library(&library)?;
    }
    Ok(response)
}

/// Summaries of up to [`MAX_COMPARED`] scenarios, in the order given.
pub fn compare_scenarios<S: KeyValueStorage>(
    store: &ScenarioStore<S>,
    ids: &[String],
) -> AppResult<Vec<ComparisonItem>> {
    if ids.is_empty() {
        return Err(AppError::InvalidInput("No scenarios to compare".to_string()));
    }
    if ids.len() > MAX_COMPARED {
        return Err(AppError::InvalidInput(format!(
            "At most {} scenarios can be compared, got {}",
            MAX_COMPARED,
            ids.len()
        )));
    }

    let library = store.load_library()?;
    let options = ResultOptions::default();
    ids.iter()
        .map(|id| -> AppResult<ComparisonItem> {
            let record = library
                .get(id)
                .ok_or_else(|| AppError::ScenarioNotFound(id.clone()))?;
            let response = ensure_result(record, &options);
            Ok(ComparisonItem::from_result(
                &record.id,
                &record.name,
                &response.output,
            ))
        })
        .collect()
}
