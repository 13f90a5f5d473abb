//! Entity emblems.
//!
//! An emblem is the key a user-visible entity is addressed by: a plain
//! name for an object, an ordered tuple of member names for a
//! relationship.

use serde::{Deserialize, Serialize};

/// Key of a user-visible entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityEmblem {
    Object(String),
    Relationship(Vec<String>),
}

impl EntityEmblem {
    /// Canonical database name of this emblem within an entity class.
    ///
    /// Objects are named as-is; relationships derive their name from the
    /// class name and the member tuple.
    pub fn to_name(&self, class_name: &str) -> String {
        match self {
            EntityEmblem::Object(name) => name.clone(),
            EntityEmblem::Relationship(members) => relationship_name(class_name, members),
        }
    }

    pub fn is_relationship(&self) -> bool {
        matches!(self, EntityEmblem::Relationship(_))
    }

    /// Member name list for relationships, `None` for objects.
    pub fn members(&self) -> Option<&[String]> {
        match self {
            EntityEmblem::Object(_) => None,
            EntityEmblem::Relationship(members) => Some(members),
        }
    }
}

impl From<&str> for EntityEmblem {
    fn from(name: &str) -> Self {
        EntityEmblem::Object(name.to_string())
    }
}

impl From<String> for EntityEmblem {
    fn from(name: String) -> Self {
        EntityEmblem::Object(name)
    }
}

impl From<Vec<String>> for EntityEmblem {
    fn from(members: Vec<String>) -> Self {
        EntityEmblem::Relationship(members)
    }
}

impl From<&[&str]> for EntityEmblem {
    fn from(members: &[&str]) -> Self {
        EntityEmblem::Relationship(members.iter().map(|member| member.to_string()).collect())
    }
}

/// Canonical name of a relationship: the class name followed by the
/// member names joined with double underscores.
pub fn relationship_name(class_name: &str, members: &[String]) -> String {
    format!("{}_{}", class_name, members.join("__"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_name_is_returned_as_is() {
        let emblem = EntityEmblem::from("my_object");
        assert_eq!(emblem.to_name("my_class"), "my_object");
    }

    #[test]
    fn relationship_name_joins_members() {
        let emblem = EntityEmblem::from(["object_1", "object_2"].as_slice());
        assert_eq!(emblem.to_name("my_class"), "my_class_object_1__object_2");
    }

    #[test]
    fn object_never_equals_relationship() {
        let object = EntityEmblem::from("a");
        let relationship = EntityEmblem::Relationship(vec!["a".to_string()]);
        assert_ne!(object, relationship);
    }
}
