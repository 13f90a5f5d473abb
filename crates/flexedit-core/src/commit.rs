//! Wire-format commit payload.
//!
//! The payload shape is fixed: every bucket is always present and an
//! idle ledger serializes to all-empty arrays. Transport-level fields
//! (commit message, project id) are attached by the caller, not here.

use serde::Serialize;
use serde_json::Value;

use crate::ledger::DatabaseId;

/// One transactional commit payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommitData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<DatabaseId>,
    pub insertions: Insertions,
    pub updates: Updates,
    pub deletions: Deletions,
}

impl CommitData {
    /// True when the payload carries no operations at all.
    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty() && self.updates.is_empty() && self.deletions.is_empty()
    }

    /// Combines two per-screen payloads into one.
    pub fn merge(mut self, other: CommitData) -> CommitData {
        self.class_id = self.class_id.or(other.class_id);
        self.insertions.object.extend(other.insertions.object);
        self.insertions
            .relationship
            .extend(other.insertions.relationship);
        self.insertions
            .alternative
            .extend(other.insertions.alternative);
        self.insertions.scenario.extend(other.insertions.scenario);
        self.insertions
            .scenario_alternative
            .extend(other.insertions.scenario_alternative);
        self.insertions
            .parameter_value
            .extend(other.insertions.parameter_value);
        self.updates.object.extend(other.updates.object);
        self.updates.relationship.extend(other.updates.relationship);
        self.updates.alternative.extend(other.updates.alternative);
        self.updates
            .parameter_value
            .extend(other.updates.parameter_value);
        self.deletions.object.extend(other.deletions.object);
        self.deletions
            .relationship
            .extend(other.deletions.relationship);
        self.deletions
            .alternative
            .extend(other.deletions.alternative);
        self.deletions.scenario.extend(other.deletions.scenario);
        self.deletions
            .parameter_value
            .extend(other.deletions.parameter_value);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Insertions {
    pub object: Vec<EntityInsertion>,
    pub relationship: Vec<EntityInsertion>,
    pub alternative: Vec<AlternativeInsertion>,
    pub scenario: Vec<ScenarioInsertion>,
    pub scenario_alternative: Vec<ScenarioAlternativeInsertion>,
    pub parameter_value: Vec<ValueInsertion>,
}

impl Insertions {
    fn is_empty(&self) -> bool {
        self.object.is_empty()
            && self.relationship.is_empty()
            && self.alternative.is_empty()
            && self.scenario.is_empty()
            && self.scenario_alternative.is_empty()
            && self.parameter_value.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Updates {
    pub object: Vec<EntityUpdate>,
    pub relationship: Vec<EntityUpdate>,
    pub alternative: Vec<AlternativeUpdate>,
    pub parameter_value: Vec<ValueUpdate>,
}

impl Updates {
    fn is_empty(&self) -> bool {
        self.object.is_empty()
            && self.relationship.is_empty()
            && self.alternative.is_empty()
            && self.parameter_value.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Deletions {
    pub object: Vec<DatabaseId>,
    pub relationship: Vec<DatabaseId>,
    pub alternative: Vec<DatabaseId>,
    pub scenario: Vec<DatabaseId>,
    pub parameter_value: Vec<DatabaseId>,
}

impl Deletions {
    fn is_empty(&self) -> bool {
        self.object.is_empty()
            && self.relationship.is_empty()
            && self.alternative.is_empty()
            && self.scenario.is_empty()
            && self.parameter_value.is_empty()
    }
}

/// A new object or relationship row. `object_name_list` is present for
/// relationships only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityInsertion {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_name_list: Option<Vec<String>>,
}

/// A rename (and, for relationships, member change) of an existing row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityUpdate {
    pub id: DatabaseId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_name_list: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeInsertion {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeUpdate {
    pub id: DatabaseId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioInsertion {
    pub name: String,
}

/// One row of a scenario's ordered alternative list; `rank` is the
/// 0-based position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioAlternativeInsertion {
    pub scenario_name: String,
    pub alternative_name: String,
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueInsertion {
    pub entity_name: String,
    pub definition_id: DatabaseId,
    pub alternative_id: DatabaseId,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueUpdate {
    pub id: DatabaseId,
    pub value: Value,
}
