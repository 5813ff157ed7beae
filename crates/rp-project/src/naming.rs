//! Default scenario names.

use std::collections::HashSet;

pub const SCENARIO_NAME_BASE: &str = "Master Plan Scheme";

/// First `"Master Plan Scheme {i}"`, counting from 1, not already taken.
pub fn next_scenario_name<'a>(existing: impl IntoIterator<Item = &'a str>) -> String {
    let taken: HashSet<&str> = existing.into_iter().collect();
    let mut i = 1usize;
    loop {
        let candidate = format!("{SCENARIO_NAME_BASE} {i}");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        i += 1;
    }
}
