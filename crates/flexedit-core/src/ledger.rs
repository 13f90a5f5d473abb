//! Generic pending-edit ledger.
//!
//! A ledger records in-flight insert/update/delete actions for one
//! collection of named rows. Chains of edits collapse as they are
//! recorded (insert-then-rename, rename-then-delete, insert-then-delete)
//! so the ledger always holds the minimum operation set consistent with
//! replaying every user action since the last commit. No rule ever needs
//! to inspect more than the touched entry, keeping every edit O(1).

use indexmap::IndexMap;

/// Backend row id. Rows created in the current session have no id until
/// the server confirms the commit.
pub type DatabaseId = i64;

/// A pending commit action against a single named row.
///
/// `original_name` is always the name the row had in the last committed
/// state, never an intermediate name. This is the invariant that makes
/// rename chains collapse losslessly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Insert,
    Update {
        id: Option<DatabaseId>,
        original_name: String,
    },
    Delete {
        id: Option<DatabaseId>,
    },
}

/// Keyed store of pending actions, keyed by the row's current name.
///
/// Invariant: a name with no pending action is never present; absence
/// means "unchanged from baseline".
#[derive(Debug, Clone, Default)]
pub struct PendingLedger {
    actions: IndexMap<String, PendingAction>,
}

impl PendingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a brand-new row, overwriting any prior action under the
    /// same name.
    pub fn insert(&mut self, name: &str) {
        self.actions.insert(name.to_string(), PendingAction::Insert);
    }

    /// Records a rename from `previous_name` to `name`.
    ///
    /// Renaming a row back to its committed name drops the action
    /// entirely; renaming a pending insertion only moves it — a row that
    /// never existed server-side can never become an update.
    pub fn update(&mut self, previous_name: &str, id: Option<DatabaseId>, name: &str) {
        match self.actions.shift_remove(previous_name) {
            None => {
                // A rename to the same name is a no-op and is not recorded.
                if name != previous_name {
                    self.actions.insert(
                        name.to_string(),
                        PendingAction::Update {
                            id,
                            original_name: previous_name.to_string(),
                        },
                    );
                }
            }
            Some(action) => match &action {
                PendingAction::Update { original_name, .. } if name == original_name => {}
                _ => {
                    self.actions.insert(name.to_string(), action);
                }
            },
        }
    }

    /// Records a deletion.
    ///
    /// A pending insertion vanishes outright; a pending update collapses
    /// to a deletion keyed by the baseline name, since the backend only
    /// recognizes the row by its committed identity.
    pub fn delete(&mut self, id: Option<DatabaseId>, name: &str) {
        match self.actions.shift_remove(name) {
            None => {
                self.actions
                    .insert(name.to_string(), PendingAction::Delete { id });
            }
            Some(PendingAction::Insert) => {}
            Some(PendingAction::Update { original_name, .. }) => {
                self.actions
                    .insert(original_name, PendingAction::Delete { id });
            }
            Some(PendingAction::Delete { .. }) => {
                self.actions
                    .insert(name.to_string(), PendingAction::Delete { id });
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.actions.is_empty()
    }

    pub fn clear_pending(&mut self) {
        self.actions.clear();
    }

    pub fn get(&self, name: &str) -> Option<&PendingAction> {
        self.actions.get(name)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterates pending actions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PendingAction)> {
        self.actions.iter().map(|(name, action)| (name.as_str(), action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_back_to_baseline_collapses_to_nothing() {
        let mut ledger = PendingLedger::new();
        ledger.update("base", Some(23), "first");
        ledger.update("first", Some(23), "second");
        ledger.update("second", Some(23), "base");
        assert!(!ledger.is_pending());
    }

    #[test]
    fn rename_chain_keeps_baseline_name() {
        let mut ledger = PendingLedger::new();
        ledger.update("base", Some(23), "first");
        ledger.update("first", Some(23), "second");
        assert_eq!(
            ledger.get("second"),
            Some(&PendingAction::Update {
                id: Some(23),
                original_name: "base".to_string()
            })
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn rename_to_same_name_is_not_recorded() {
        let mut ledger = PendingLedger::new();
        ledger.update("base", Some(23), "base");
        assert!(!ledger.is_pending());
    }

    #[test]
    fn renamed_insertion_stays_an_insertion() {
        let mut ledger = PendingLedger::new();
        ledger.insert("fresh");
        ledger.update("fresh", None, "renamed");
        assert_eq!(ledger.get("renamed"), Some(&PendingAction::Insert));
        assert_eq!(ledger.get("fresh"), None);
    }

    #[test]
    fn deleting_an_insertion_leaves_no_trace() {
        let mut ledger = PendingLedger::new();
        ledger.insert("fresh");
        ledger.delete(None, "fresh");
        assert!(!ledger.is_pending());
    }

    #[test]
    fn deleting_a_renamed_row_keys_the_deletion_by_baseline_name() {
        let mut ledger = PendingLedger::new();
        ledger.update("base", Some(23), "renamed");
        ledger.delete(Some(23), "renamed");
        assert_eq!(
            ledger.get("base"),
            Some(&PendingAction::Delete { id: Some(23) })
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn disjoint_names_do_not_interfere() {
        let mut ledger = PendingLedger::new();
        ledger.insert("a");
        ledger.update("b", Some(1), "b2");
        ledger.delete(Some(2), "c");
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.get("a"), Some(&PendingAction::Insert));
        assert_eq!(
            ledger.get("b2"),
            Some(&PendingAction::Update {
                id: Some(1),
                original_name: "b".to_string()
            })
        );
        assert_eq!(ledger.get("c"), Some(&PendingAction::Delete { id: Some(2) }));
    }
}
