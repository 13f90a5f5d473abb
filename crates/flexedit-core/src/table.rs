//! Scenario/alternative text table.
//!
//! The scenario screen edits scenarios as a block of text, one scenario
//! per line: `scenario_name alt_1 alt_2 …`. The table is parsed into an
//! ordered map and diffed against the last committed scenario list to
//! produce insert/delete operations; the association is always replaced
//! as a whole ordered list, never patched incrementally.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::DatabaseId;

/// Parsed table: ordered alternative name lists keyed by scenario name.
pub type ScenarioAlternatives = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableParseError {
    #[error("Duplicate scenario '{0}'")]
    DuplicateScenario(String),
}

/// A scenario as last confirmed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    pub scenario_id: DatabaseId,
    pub scenario_name: String,
    pub scenario_alternatives: Vec<String>,
}

/// Extracts scenarios and their alternative lists from a text table.
///
/// Lines are trimmed and blank lines skipped; tokens are separated by
/// runs of whitespace and the first token is the scenario name. A
/// scenario name appearing twice is a hard parse error, not a silent
/// overwrite.
pub fn parse_scenario_alternatives(text: &str) -> Result<ScenarioAlternatives, TableParseError> {
    let mut scenario_alternatives = ScenarioAlternatives::new();
    for line in text.lines() {
        let mut tokens = line.split_whitespace();
        let Some(scenario) = tokens.next() else {
            continue;
        };
        if scenario_alternatives.contains_key(scenario) {
            return Err(TableParseError::DuplicateScenario(scenario.to_string()));
        }
        let alternatives = tokens.map(str::to_string).collect();
        scenario_alternatives.insert(scenario.to_string(), alternatives);
    }
    Ok(scenario_alternatives)
}

/// Formats committed scenarios back into table text, one line per
/// scenario. Left inverse of [`parse_scenario_alternatives`] for
/// duplicate-free scenario lists.
pub fn make_scenario_alternatives_table(scenarios: &[ScenarioRecord]) -> String {
    let mut lines = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let mut line = scenario.scenario_name.clone();
        for alternative in &scenario.scenario_alternatives {
            line.push(' ');
            line.push_str(alternative);
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Insertion decided by the diff. `scenario_id` is present when an
/// existing scenario is being replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioInsertionAction {
    pub scenario_name: String,
    pub scenario_id: Option<DatabaseId>,
    pub scenario_alternatives: Vec<String>,
}

/// Deletion decided by the diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioDeletionAction {
    pub scenario_id: DatabaseId,
    pub scenario_name: String,
}

/// Operations required to reconcile a parsed table with the baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioActions {
    pub inserted: Vec<ScenarioInsertionAction>,
    pub deleted: Vec<ScenarioDeletionAction>,
}

/// Compares a parsed table to the last committed scenarios and decides
/// the required operations.
///
/// A scenario with an identical ordered alternative list needs nothing;
/// both count and positional equality must hold, so reordering is a
/// change. A changed list becomes an insertion carrying the existing id
/// and the new full list, which the scenario ledger turns into a
/// delete-plus-recreate.
pub fn scenario_actions(
    scenario_alternatives: &ScenarioAlternatives,
    original_scenarios: &[ScenarioRecord],
) -> ScenarioActions {
    let original: IndexMap<&str, &ScenarioRecord> = original_scenarios
        .iter()
        .map(|scenario| (scenario.scenario_name.as_str(), scenario))
        .collect();
    let mut actions = ScenarioActions::default();
    for (scenario_name, alternatives) in scenario_alternatives {
        match original.get(scenario_name.as_str()) {
            None => actions.inserted.push(ScenarioInsertionAction {
                scenario_name: scenario_name.clone(),
                scenario_id: None,
                scenario_alternatives: alternatives.clone(),
            }),
            Some(original_scenario) => {
                if alternatives != &original_scenario.scenario_alternatives {
                    actions.inserted.push(ScenarioInsertionAction {
                        scenario_name: scenario_name.clone(),
                        scenario_id: Some(original_scenario.scenario_id),
                        scenario_alternatives: alternatives.clone(),
                    });
                }
            }
        }
    }
    for original_scenario in original_scenarios {
        if !scenario_alternatives.contains_key(&original_scenario.scenario_name) {
            actions.deleted.push(ScenarioDeletionAction {
                scenario_id: original_scenario.scenario_id,
                scenario_name: original_scenario.scenario_name.clone(),
            });
        }
    }
    actions
}
