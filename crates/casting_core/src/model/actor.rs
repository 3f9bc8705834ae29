//! Actor record.

use super::{Record, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of the `actors` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub name: String,
    pub age: i64,
    pub gender: String,
}

impl Actor {
    /// Creates an unsaved actor.
    pub fn new(name: impl Into<String>, age: i64, gender: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            age,
            gender: gender.into(),
        }
    }

    /// Returns whether storage has assigned an id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Overwrites the fields present in `patch`.
    pub fn apply(&mut self, patch: ActorPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
    }
}

impl Record for Actor {
    const TABLE: &'static str = "actors";
    const FIELDS: &'static [&'static str] = &["id", "name", "age", "gender"];

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn format(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".to_string(), self.id.into());
        map.insert("name".to_string(), self.name.clone().into());
        map.insert("age".to_string(), self.age.into());
        map.insert("gender".to_string(), self.gender.clone().into());
        map
    }
}

/// Partial update payload for an actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActorPatch {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
}

impl ActorPatch {
    /// Returns whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.gender.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::{Actor, ActorPatch};

    #[test]
    fn apply_overwrites_only_present_fields() {
        let mut actor = Actor::new("Ed Asner", 79, "male");
        assert!(!actor.is_persisted());
        actor.apply(ActorPatch {
            age: Some(80),
            ..ActorPatch::default()
        });
        assert_eq!(actor.name, "Ed Asner");
        assert_eq!(actor.age, 80);
        assert_eq!(actor.gender, "male");
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(ActorPatch::default().is_empty());
        let patch: ActorPatch = serde_json::from_str(r#"{"gender":"female"}"#).unwrap();
        assert!(!patch.is_empty());
    }
}
