//! Ledger for alternatives, scenarios and their ordered associations.
//!
//! Alternatives follow the generic collapsing rules. Scenarios are
//! edited as whole ordered lists: a pending scenario insertion carries
//! the complete replacement list of alternative names, and replacing an
//! existing scenario deletes the old row and recreates the association
//! from scratch.

use indexmap::IndexMap;

use crate::commit::{
    AlternativeInsertion, AlternativeUpdate, CommitData, ScenarioAlternativeInsertion,
    ScenarioInsertion,
};
use crate::ledger::{DatabaseId, PendingAction, PendingLedger};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScenarioAction {
    Insert,
    Delete,
}

#[derive(Debug, Clone)]
struct PendingScenario {
    action: ScenarioAction,
    id: Option<DatabaseId>,
    /// Complete replacement list for the scenario's alternatives, never
    /// a delta.
    alternatives: Option<Vec<String>>,
}

/// Store for uncommitted changes to alternatives, scenarios and
/// scenario alternatives.
#[derive(Debug, Clone, Default)]
pub struct ScenarioDiff {
    alternatives: PendingLedger,
    scenarios: IndexMap<String, PendingScenario>,
}

impl ScenarioDiff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_alternative(&mut self, name: &str) {
        self.alternatives.insert(name);
    }

    pub fn update_alternative(&mut self, previous_name: &str, id: Option<DatabaseId>, name: &str) {
        self.alternatives.update(previous_name, id, name);
    }

    pub fn delete_alternative(&mut self, id: Option<DatabaseId>, name: &str) {
        self.alternatives.delete(id, name);
    }

    /// Records a scenario deletion. A scenario that never reached the
    /// server vanishes outright.
    pub fn delete_scenario(&mut self, id: Option<DatabaseId>, name: &str) {
        match self.scenarios.get_mut(name) {
            Some(pending) => {
                if pending.id.is_none() {
                    self.scenarios.shift_remove(name);
                } else {
                    pending.action = ScenarioAction::Delete;
                    pending.id = id;
                    pending.alternatives = None;
                }
            }
            None => {
                self.scenarios.insert(
                    name.to_string(),
                    PendingScenario {
                        action: ScenarioAction::Delete,
                        id,
                        alternatives: None,
                    },
                );
            }
        }
    }

    /// Stores the full replacement alternative list for a scenario.
    ///
    /// When `scenario_id` refers to an existing row the commit will
    /// delete it and recreate the scenario wholesale; ranks on an
    /// ordered association are cheap to regenerate but error-prone to
    /// patch positionally.
    pub fn insert_scenario_alternatives(
        &mut self,
        scenario_id: Option<DatabaseId>,
        scenario_name: &str,
        alternative_names: &[String],
    ) {
        let pending = self
            .scenarios
            .entry(scenario_name.to_string())
            .or_insert_with(|| PendingScenario {
                action: ScenarioAction::Insert,
                id: scenario_id,
                alternatives: None,
            });
        pending.action = ScenarioAction::Insert;
        pending.alternatives = Some(alternative_names.to_vec());
    }

    /// Checks if there are uncommitted changes.
    pub fn is_pending(&self) -> bool {
        self.alternatives.is_pending() || !self.scenarios.is_empty()
    }

    /// Resets uncommitted changes; called after a confirmed commit.
    pub fn clear_pending(&mut self) {
        self.alternatives.clear_pending();
        self.scenarios.clear();
    }

    /// Drops pending scenario entries while keeping pending alternative
    /// edits. Used when the scenario table is re-staged from text.
    pub fn clear_pending_scenarios(&mut self) {
        self.scenarios.clear();
    }

    /// Walks the ledger once and buckets every pending action into the
    /// wire-format payload.
    pub fn commit_data(&self) -> CommitData {
        let mut data = CommitData::default();
        for (name, action) in self.alternatives.iter() {
            match action {
                PendingAction::Insert => data.insertions.alternative.push(AlternativeInsertion {
                    name: name.to_string(),
                }),
                PendingAction::Update { id: Some(id), .. } => {
                    data.updates.alternative.push(AlternativeUpdate {
                        id: *id,
                        name: name.to_string(),
                    });
                }
                PendingAction::Update { id: None, .. } => {}
                PendingAction::Delete { id: Some(id) } => data.deletions.alternative.push(*id),
                PendingAction::Delete { id: None } => {}
            }
        }
        for (name, pending) in &self.scenarios {
            match pending.action {
                ScenarioAction::Insert => {
                    data.insertions.scenario.push(ScenarioInsertion { name: name.clone() });
                    if let Some(alternatives) = &pending.alternatives {
                        // Replacing an existing scenario: the old row goes
                        // away and the whole association is recreated.
                        if let Some(id) = pending.id {
                            data.deletions.scenario.push(id);
                        }
                        for (rank, alternative_name) in alternatives.iter().enumerate() {
                            data.insertions.scenario_alternative.push(
                                ScenarioAlternativeInsertion {
                                    scenario_name: name.clone(),
                                    alternative_name: alternative_name.clone(),
                                    rank,
                                },
                            );
                        }
                    }
                }
                ScenarioAction::Delete => {
                    if let Some(id) = pending.id {
                        data.deletions.scenario.push(id);
                    }
                }
            }
        }
        data
    }
}
