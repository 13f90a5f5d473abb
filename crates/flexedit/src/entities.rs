//! Entity screen controller.
//!
//! A thin commit gate around an [`EntityDiff`]: entity and parameter
//! value edits flow straight into the ledger, and one outstanding
//! commit at a time is allowed per screen.

use flexedit_core::value::EditorValue;
use flexedit_core::{CommitData, DatabaseId, EntityDiff, EntityEmblem};

use crate::baseline::CommitResult;
use crate::transport::{CommitError, CommitTransport};

pub struct EntityEditor {
    diff: EntityDiff,
    committing: bool,
}

impl EntityEditor {
    pub fn new(class_id: DatabaseId, class_name: impl Into<String>) -> Self {
        EntityEditor {
            diff: EntityDiff::new(class_id, class_name),
            committing: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.diff.is_pending()
    }

    pub fn is_committing(&self) -> bool {
        self.committing
    }

    pub fn insert_entity(&mut self, emblem: &EntityEmblem) {
        self.diff.insert_entity(emblem);
    }

    pub fn rename_entity(
        &mut self,
        previous_emblem: &EntityEmblem,
        id: Option<DatabaseId>,
        emblem: &EntityEmblem,
    ) {
        self.diff.update_entity(previous_emblem, id, emblem);
    }

    pub fn delete_entity(&mut self, id: Option<DatabaseId>, emblem: &EntityEmblem) {
        self.diff.delete_entity(id, emblem);
    }

    pub fn insert_value(
        &mut self,
        value: impl Into<EditorValue>,
        emblem: &EntityEmblem,
        definition_id: DatabaseId,
        alternative_id: DatabaseId,
    ) {
        self.diff
            .insert_value(value, emblem, definition_id, alternative_id);
    }

    pub fn update_value(
        &mut self,
        value: impl Into<EditorValue>,
        id: Option<DatabaseId>,
        emblem: &EntityEmblem,
        definition_id: DatabaseId,
        alternative_id: DatabaseId,
    ) {
        self.diff
            .update_value(value, id, emblem, definition_id, alternative_id);
    }

    pub fn delete_value(
        &mut self,
        id: Option<DatabaseId>,
        emblem: &EntityEmblem,
        definition_id: DatabaseId,
        alternative_id: DatabaseId,
    ) {
        self.diff
            .delete_value(id, emblem, definition_id, alternative_id);
    }

    /// In-flight value for a slot, if any; keeps UI fields reflecting
    /// uncommitted edits.
    pub fn pending_value(
        &self,
        emblem: &EntityEmblem,
        definition_id: DatabaseId,
        alternative_id: DatabaseId,
    ) -> Option<&EditorValue> {
        self.diff.pending_value(emblem, definition_id, alternative_id)
    }

    pub fn is_pending_deletion(
        &self,
        emblem: &EntityEmblem,
        definition_id: DatabaseId,
        alternative_id: DatabaseId,
    ) -> bool {
        self.diff
            .is_pending_deletion(emblem, definition_id, alternative_id)
    }

    /// Commit payload for the current ledger state.
    pub fn stage(&self) -> CommitData {
        self.diff.commit_data()
    }

    /// Sends the pending edits as one transactional commit. On success
    /// the ledger is cleared and the server's confirmation (with the
    /// newly assigned ids) is returned; on failure the ledger is left
    /// untouched for retry.
    pub fn commit<T: CommitTransport>(
        &mut self,
        transport: &mut T,
        message: &str,
    ) -> Result<CommitResult, CommitError> {
        if self.committing {
            return Err(CommitError::CommitInProgress);
        }
        let data = self.diff.commit_data();
        self.committing = true;
        let result = transport.commit(&data, message);
        self.committing = false;
        let confirmation = result?;
        self.diff.clear_pending();
        Ok(confirmation)
    }
}
