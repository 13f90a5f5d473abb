//! Entity ledger with per-entity parameter value sub-ledgers.
//!
//! One `EntityDiff` tracks uncommitted changes to a single entity class:
//! the entities themselves (inserted, renamed, deleted) and, nested
//! under each tracked entity, one value action per (parameter
//! definition, alternative) pair.

use indexmap::IndexMap;

use crate::commit::{
    CommitData, EntityInsertion, EntityUpdate, ValueInsertion, ValueUpdate,
};
use crate::emblem::EntityEmblem;
use crate::ledger::DatabaseId;
use crate::value::EditorValue;

/// Pending commit action for one entity. The entity's current name is
/// the key it is stored under, so only baseline identity and member
/// lists are carried here.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityAction {
    Insert {
        /// Ordered member names, present for relationships only.
        members: Option<Vec<String>>,
    },
    Update {
        id: Option<DatabaseId>,
        members: Option<Vec<String>>,
        /// Name of the entity in the last committed state.
        original_name: String,
    },
    Delete {
        id: Option<DatabaseId>,
        relationship: bool,
    },
}

/// Pending commit action for one parameter value slot. Values have no
/// name, so there is no rename concept.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueAction {
    Insert { value: EditorValue },
    Update { id: DatabaseId, value: EditorValue },
    Delete { id: DatabaseId },
}

/// Uncommitted changes to one entity and its parameter values.
#[derive(Debug, Clone, Default)]
struct PendingEntity {
    action: Option<EntityAction>,
    /// Parameter definition id → alternative id → value action.
    parameters: IndexMap<DatabaseId, IndexMap<DatabaseId, ValueAction>>,
}

impl PendingEntity {
    fn with_action(action: EntityAction) -> Self {
        PendingEntity {
            action: Some(action),
            parameters: IndexMap::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.action.is_none() && self.parameters.is_empty()
    }
}

/// Store for uncommitted changes to entities and parameter values of a
/// single entity class.
#[derive(Debug, Clone)]
pub struct EntityDiff {
    class_id: DatabaseId,
    class_name: String,
    pending: IndexMap<String, PendingEntity>,
}

impl EntityDiff {
    pub fn new(class_id: DatabaseId, class_name: impl Into<String>) -> Self {
        EntityDiff {
            class_id,
            class_name: class_name.into(),
            pending: IndexMap::new(),
        }
    }

    pub fn class_id(&self) -> DatabaseId {
        self.class_id
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Checks if there are uncommitted changes.
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Resets uncommitted changes; called after a confirmed commit.
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Records a new entity, overwriting any prior pending state under
    /// the same name.
    pub fn insert_entity(&mut self, emblem: &EntityEmblem) {
        let name = emblem.to_name(&self.class_name);
        let members = emblem.members().map(<[String]>::to_vec);
        self.pending
            .insert(name, PendingEntity::with_action(EntityAction::Insert { members }));
    }

    /// Records a rename (or, for relationships, a member change).
    ///
    /// Renaming back to the committed name drops the entity action but
    /// keeps pending parameter values attached; a pending insertion is
    /// only rekeyed and never becomes an update.
    pub fn update_entity(
        &mut self,
        previous_emblem: &EntityEmblem,
        id: Option<DatabaseId>,
        emblem: &EntityEmblem,
    ) {
        let previous_name = previous_emblem.to_name(&self.class_name);
        let name = emblem.to_name(&self.class_name);
        let members = emblem.members().map(<[String]>::to_vec);
        match self.pending.shift_remove(&previous_name) {
            None => {
                if name != previous_name {
                    self.pending.insert(
                        name,
                        PendingEntity::with_action(EntityAction::Update {
                            id,
                            members,
                            original_name: previous_name,
                        }),
                    );
                }
            }
            Some(mut entry) => match entry.action.take() {
                Some(EntityAction::Insert { .. }) => {
                    entry.action = Some(EntityAction::Insert { members });
                    self.pending.insert(name, entry);
                }
                Some(EntityAction::Update { original_name, .. }) if name == original_name => {
                    if !entry.is_empty() {
                        self.pending.insert(name, entry);
                    }
                }
                Some(EntityAction::Update {
                    id: pending_id,
                    original_name,
                    ..
                }) => {
                    entry.action = Some(EntityAction::Update {
                        id: pending_id,
                        members,
                        original_name,
                    });
                    self.pending.insert(name, entry);
                }
                Some(action @ EntityAction::Delete { .. }) => {
                    // A deleted entity cannot be renamed; keep the deletion.
                    entry.action = Some(action);
                    self.pending.insert(previous_name, entry);
                }
                None => {
                    entry.action = Some(EntityAction::Update {
                        id,
                        members,
                        original_name: previous_name,
                    });
                    self.pending.insert(name, entry);
                }
            },
        }
    }

    /// Records a deletion.
    ///
    /// An entity that was only ever inserted vanishes along with all of
    /// its pending values; a renamed entity collapses to a deletion
    /// keyed by its baseline name.
    pub fn delete_entity(&mut self, id: Option<DatabaseId>, emblem: &EntityEmblem) {
        let name = emblem.to_name(&self.class_name);
        let relationship = emblem.is_relationship();
        match self.pending.shift_remove(&name) {
            None => {
                self.pending.insert(
                    name,
                    PendingEntity::with_action(EntityAction::Delete { id, relationship }),
                );
            }
            Some(mut entry) => match entry.action.take() {
                Some(EntityAction::Insert { .. }) => {}
                Some(EntityAction::Update { original_name, .. }) => {
                    self.pending.insert(
                        original_name,
                        PendingEntity::with_action(EntityAction::Delete { id, relationship }),
                    );
                }
                Some(EntityAction::Delete { .. }) | None => {
                    entry.parameters.clear();
                    entry.action = Some(EntityAction::Delete { id, relationship });
                    self.pending.insert(name, entry);
                }
            },
        }
    }

    /// Records a new parameter value for the (definition, alternative)
    /// slot of an entity.
    pub fn insert_value(
        &mut self,
        value: impl Into<EditorValue>,
        emblem: &EntityEmblem,
        definition_id: DatabaseId,
        alternative_id: DatabaseId,
    ) {
        let name = emblem.to_name(&self.class_name);
        self.set_value_action(name, definition_id, alternative_id, ValueAction::Insert {
            value: value.into(),
        });
    }

    /// Records a value change. A value that never had a backend id is
    /// still an insertion.
    pub fn update_value(
        &mut self,
        value: impl Into<EditorValue>,
        id: Option<DatabaseId>,
        emblem: &EntityEmblem,
        definition_id: DatabaseId,
        alternative_id: DatabaseId,
    ) {
        let name = emblem.to_name(&self.class_name);
        let action = match id {
            None => ValueAction::Insert { value: value.into() },
            Some(id) => ValueAction::Update { id, value: value.into() },
        };
        self.set_value_action(name, definition_id, alternative_id, action);
    }

    /// Records a value deletion. A slot holding only a pending insertion
    /// is removed outright, pruning empty parents upward.
    pub fn delete_value(
        &mut self,
        id: Option<DatabaseId>,
        emblem: &EntityEmblem,
        definition_id: DatabaseId,
        alternative_id: DatabaseId,
    ) {
        let name = emblem.to_name(&self.class_name);
        match id {
            None => {
                let Some(entry) = self.pending.get_mut(&name) else {
                    return;
                };
                if let Some(alternatives) = entry.parameters.get_mut(&definition_id) {
                    alternatives.shift_remove(&alternative_id);
                    if alternatives.is_empty() {
                        entry.parameters.shift_remove(&definition_id);
                    }
                }
                if entry.is_empty() {
                    self.pending.shift_remove(&name);
                }
            }
            Some(id) => {
                self.set_value_action(name, definition_id, alternative_id, ValueAction::Delete {
                    id,
                });
            }
        }
    }

    /// Returns the in-flight value for a slot, if any. Used to keep UI
    /// fields reflecting uncommitted edits.
    pub fn pending_value(
        &self,
        emblem: &EntityEmblem,
        definition_id: DatabaseId,
        alternative_id: DatabaseId,
    ) -> Option<&EditorValue> {
        let name = emblem.to_name(&self.class_name);
        match self.value_action(&name, definition_id, alternative_id)? {
            ValueAction::Insert { value } | ValueAction::Update { value, .. } => Some(value),
            ValueAction::Delete { .. } => None,
        }
    }

    /// True when the slot's value is queued for deletion. Used to grey
    /// out UI widgets without discarding them until commit.
    pub fn is_pending_deletion(
        &self,
        emblem: &EntityEmblem,
        definition_id: DatabaseId,
        alternative_id: DatabaseId,
    ) -> bool {
        let name = emblem.to_name(&self.class_name);
        matches!(
            self.value_action(&name, definition_id, alternative_id),
            Some(ValueAction::Delete { .. })
        )
    }

    fn set_value_action(
        &mut self,
        name: String,
        definition_id: DatabaseId,
        alternative_id: DatabaseId,
        action: ValueAction,
    ) {
        self.pending
            .entry(name)
            .or_default()
            .parameters
            .entry(definition_id)
            .or_default()
            .insert(alternative_id, action);
    }

    fn value_action(
        &self,
        name: &str,
        definition_id: DatabaseId,
        alternative_id: DatabaseId,
    ) -> Option<&ValueAction> {
        self.pending
            .get(name)?
            .parameters
            .get(&definition_id)?
            .get(&alternative_id)
    }

    /// Walks the ledger once and buckets every pending action into the
    /// wire-format payload. Pure; the ledger is left untouched.
    pub fn commit_data(&self) -> CommitData {
        let mut data = CommitData {
            class_id: Some(self.class_id),
            ..CommitData::default()
        };
        for (name, entry) in &self.pending {
            match &entry.action {
                Some(EntityAction::Insert { members }) => {
                    let insertion = EntityInsertion {
                        name: name.clone(),
                        object_name_list: members.clone(),
                    };
                    if members.is_some() {
                        data.insertions.relationship.push(insertion);
                    } else {
                        data.insertions.object.push(insertion);
                    }
                }
                Some(EntityAction::Update { id: Some(id), members, .. }) => {
                    let update = EntityUpdate {
                        id: *id,
                        name: name.clone(),
                        object_name_list: members.clone(),
                    };
                    if members.is_some() {
                        data.updates.relationship.push(update);
                    } else {
                        data.updates.object.push(update);
                    }
                }
                Some(EntityAction::Update { id: None, .. }) => {}
                Some(EntityAction::Delete { id, relationship }) => {
                    if let Some(id) = id {
                        if *relationship {
                            data.deletions.relationship.push(*id);
                        } else {
                            data.deletions.object.push(*id);
                        }
                    }
                    // A deleted entity contributes no value operations.
                    continue;
                }
                None => {}
            }
            for (definition_id, alternatives) in &entry.parameters {
                for (alternative_id, action) in alternatives {
                    match action {
                        ValueAction::Insert { value } => {
                            data.insertions.parameter_value.push(ValueInsertion {
                                entity_name: name.clone(),
                                definition_id: *definition_id,
                                alternative_id: *alternative_id,
                                value: value.to_wire(),
                            });
                        }
                        ValueAction::Update { id, value } => {
                            data.updates.parameter_value.push(ValueUpdate {
                                id: *id,
                                value: value.to_wire(),
                            });
                        }
                        ValueAction::Delete { id } => {
                            data.deletions.parameter_value.push(*id);
                        }
                    }
                }
            }
        }
        data
    }
}
