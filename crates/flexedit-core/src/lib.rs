//! Pending-edit ledger and commit reconciliation for a relational model
//! editor.
//!
//! Edits against entities, parameter values, alternatives and scenarios
//! are recorded locally against a baseline snapshot, collapsed into a
//! minimal non-contradictory operation set, validated, and finally
//! serialized into a single transactional commit payload.

pub mod commit;
pub mod emblem;
pub mod entity;
pub mod ledger;
pub mod scenario;
pub mod table;
pub mod validate;
pub mod value;

pub use commit::CommitData;
pub use emblem::{relationship_name, EntityEmblem};
pub use entity::EntityDiff;
pub use ledger::{DatabaseId, PendingAction, PendingLedger};
pub use scenario::ScenarioDiff;
pub use table::{
    make_scenario_alternatives_table, parse_scenario_alternatives, scenario_actions,
    ScenarioActions, ScenarioRecord, TableParseError,
};
pub use validate::{validate_scenario_alternatives, ScenarioValidationError};
pub use value::{semi_value_to_value, EditorValue, Scalar, SemiValue};

/// Returns the crate version at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
