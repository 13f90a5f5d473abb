//! Baseline snapshots and commit confirmations.
//!
//! Snapshots are the last server-confirmed state a ledger diffs
//! against. They are supplied by a fetch-style collaborator, treated as
//! read-only, and replaced wholesale after each successful commit or
//! refetch.

use serde::{Deserialize, Serialize};

use flexedit_core::DatabaseId;
pub use flexedit_core::ScenarioRecord;

/// An alternative row known to the editor. Rows created in the current
/// session carry no id until the server confirms the commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeRecord {
    pub id: Option<DatabaseId>,
    pub name: String,
}

/// Scenario listing as returned by the fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScenarioData {
    pub scenarios: Vec<ScenarioRecord>,
}

/// Alternative listing as returned by the fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlternativeData {
    pub alternatives: Vec<AlternativeRecord>,
}

/// Row identifiers assigned by the backend for a successful commit.
/// Absence of a field means nothing of that kind was inserted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitResult {
    #[serde(default)]
    pub inserted: InsertedRows,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsertedRows {
    #[serde(default)]
    pub object: Vec<InsertedRow>,
    #[serde(default)]
    pub relationship: Vec<InsertedRow>,
    #[serde(default)]
    pub alternative: Vec<InsertedRow>,
    #[serde(default)]
    pub scenario: Vec<InsertedRow>,
}

/// One newly inserted row with its backend-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InsertedRow {
    pub id: DatabaseId,
    pub name: String,
}
