//! Scenario screen controller.
//!
//! Owns the scenario/alternative ledger, the baseline snapshots and the
//! table text. Every edit re-runs parsing and validation so the commit
//! control can be gated purely on the validation message being empty.

use std::collections::HashSet;

use flexedit_core::table::ScenarioAlternatives;
use flexedit_core::{
    make_scenario_alternatives_table, parse_scenario_alternatives, scenario_actions,
    validate_scenario_alternatives, DatabaseId, ScenarioDiff,
};

use crate::baseline::{AlternativeRecord, CommitResult, ScenarioRecord};
use crate::transport::{CommitError, CommitTransport};

/// State behind the scenarios screen: baseline snapshots, pending
/// edits and the free-text scenario table.
#[derive(Debug, Clone)]
pub struct ScenarioEditor {
    diff: ScenarioDiff,
    scenarios: Vec<ScenarioRecord>,
    alternatives: Vec<AlternativeRecord>,
    table_text: String,
    error_message: String,
    committing: bool,
}

impl ScenarioEditor {
    /// Builds the editor from freshly fetched baseline data. The table
    /// text starts out as the formatted baseline.
    pub fn new(scenarios: Vec<ScenarioRecord>, alternatives: Vec<AlternativeRecord>) -> Self {
        let table_text = make_scenario_alternatives_table(&scenarios);
        let mut editor = ScenarioEditor {
            diff: ScenarioDiff::new(),
            scenarios,
            alternatives,
            table_text,
            error_message: String::new(),
            committing: false,
        };
        editor.refresh_validation();
        editor
    }

    pub fn table_text(&self) -> &str {
        &self.table_text
    }

    /// Current validation message; empty means the table can be
    /// committed.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn is_valid(&self) -> bool {
        self.error_message.is_empty()
    }

    pub fn is_committing(&self) -> bool {
        self.committing
    }

    pub fn is_pending(&self) -> bool {
        self.diff.is_pending()
    }

    pub fn scenarios(&self) -> &[ScenarioRecord] {
        &self.scenarios
    }

    pub fn alternatives(&self) -> &[AlternativeRecord] {
        &self.alternatives
    }

    /// Replaces the table text and re-validates.
    pub fn set_table_text(&mut self, text: &str) {
        self.table_text = text.to_string();
        self.refresh_validation();
    }

    /// Queues a new alternative and adds it to the known set.
    pub fn insert_alternative(&mut self, name: &str) {
        self.alternatives.push(AlternativeRecord {
            id: None,
            name: name.to_string(),
        });
        self.diff.insert_alternative(name);
        self.refresh_validation();
    }

    /// Queues a rename of an alternative, updating the known set.
    pub fn rename_alternative(&mut self, previous_name: &str, name: &str) {
        let Some(record) = self
            .alternatives
            .iter_mut()
            .find(|alternative| alternative.name == previous_name)
        else {
            return;
        };
        let id = record.id;
        record.name = name.to_string();
        self.diff.update_alternative(previous_name, id, name);
        self.refresh_validation();
    }

    /// Queues a deletion of an alternative, removing it from the known
    /// set.
    pub fn delete_alternative(&mut self, name: &str) {
        let Some(position) = self
            .alternatives
            .iter()
            .position(|alternative| alternative.name == name)
        else {
            return;
        };
        let record = self.alternatives.remove(position);
        self.diff.delete_alternative(record.id, name);
        self.refresh_validation();
    }

    /// Builds the commit payload for the current state without sending
    /// it. Stages the table first so the payload reflects the text.
    pub fn stage(&mut self) -> Result<flexedit_core::CommitData, CommitError> {
        let parsed = self.checked_table()?;
        self.stage_scenarios(&parsed);
        Ok(self.diff.commit_data())
    }

    /// Sends the current state as one transactional commit.
    ///
    /// Refused while a commit is outstanding or the table is invalid.
    /// On success the ledger is cleared, ids of alternatives created in
    /// this session are backfilled and the baseline is replaced by the
    /// committed table; on failure everything is left untouched for
    /// retry.
    pub fn commit<T: CommitTransport>(
        &mut self,
        transport: &mut T,
        message: &str,
    ) -> Result<(), CommitError> {
        if self.committing {
            return Err(CommitError::CommitInProgress);
        }
        let parsed = self.checked_table()?;
        self.stage_scenarios(&parsed);
        let data = self.diff.commit_data();
        self.committing = true;
        let result = transport.commit(&data, message);
        self.committing = false;
        let confirmation = result?;
        self.apply_commit(parsed, &confirmation);
        Ok(())
    }

    fn known_alternative_names(&self) -> HashSet<String> {
        self.alternatives
            .iter()
            .map(|alternative| alternative.name.clone())
            .collect()
    }

    fn checked_table(&self) -> Result<ScenarioAlternatives, CommitError> {
        let parsed = parse_scenario_alternatives(&self.table_text)?;
        validate_scenario_alternatives(&parsed, &self.known_alternative_names())?;
        Ok(parsed)
    }

    /// Converts the parsed table into ledger operations, replacing any
    /// previously staged scenario entries. Pending alternative edits
    /// are kept.
    fn stage_scenarios(&mut self, parsed: &ScenarioAlternatives) {
        self.diff.clear_pending_scenarios();
        let actions = scenario_actions(parsed, &self.scenarios);
        for insertion in &actions.inserted {
            self.diff.insert_scenario_alternatives(
                insertion.scenario_id,
                &insertion.scenario_name,
                &insertion.scenario_alternatives,
            );
        }
        for deletion in &actions.deleted {
            self.diff
                .delete_scenario(Some(deletion.scenario_id), &deletion.scenario_name);
        }
    }

    fn refresh_validation(&mut self) {
        self.error_message = match parse_scenario_alternatives(&self.table_text) {
            Ok(parsed) => {
                match validate_scenario_alternatives(&parsed, &self.known_alternative_names()) {
                    Ok(()) => String::new(),
                    Err(error) => error.to_string(),
                }
            }
            Err(error) => error.to_string(),
        };
    }

    fn apply_commit(&mut self, parsed: ScenarioAlternatives, confirmation: &CommitResult) {
        self.diff.clear_pending();
        for row in &confirmation.inserted.alternative {
            if let Some(record) = self
                .alternatives
                .iter_mut()
                .find(|alternative| alternative.name == row.name)
            {
                record.id = Some(row.id);
            }
        }
        let mut scenarios = Vec::with_capacity(parsed.len());
        for (scenario_name, scenario_alternatives) in parsed {
            let scenario_id = confirmation
                .inserted
                .scenario
                .iter()
                .find(|row| row.name == scenario_name)
                .map(|row| row.id)
                .or_else(|| self.baseline_scenario_id(&scenario_name));
            // A row the server neither confirmed nor previously knew
            // cannot be represented; it will reappear on refetch.
            if let Some(scenario_id) = scenario_id {
                scenarios.push(ScenarioRecord {
                    scenario_id,
                    scenario_name,
                    scenario_alternatives,
                });
            }
        }
        self.scenarios = scenarios;
    }

    fn baseline_scenario_id(&self, name: &str) -> Option<DatabaseId> {
        self.scenarios
            .iter()
            .find(|scenario| scenario.scenario_name == name)
            .map(|scenario| scenario.scenario_id)
    }
}
