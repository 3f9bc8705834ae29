//! Movie record.

use super::{Record, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of the `movies` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Assigned by storage; absent in request payloads for new movies.
    #[serde(default)]
    pub id: Option<RecordId>,
    pub title: String,
    /// Free-form date text, stored as given (e.g. `2009-05-29`).
    pub release_date: String,
}

impl Movie {
    /// Creates an unsaved movie.
    pub fn new(title: impl Into<String>, release_date: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            release_date: release_date.into(),
        }
    }

    /// Returns whether storage has assigned an id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Overwrites the fields present in `patch`.
    pub fn apply(&mut self, patch: MoviePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(release_date) = patch.release_date {
            self.release_date = release_date;
        }
    }
}

impl Record for Movie {
    const TABLE: &'static str = "movies";
    const FIELDS: &'static [&'static str] = &["id", "title", "release_date"];

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn format(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".to_string(), self.id.into());
        map.insert("title".to_string(), self.title.clone().into());
        map.insert("release_date".to_string(), self.release_date.clone().into());
        map
    }
}

/// Partial update payload for a movie. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub release_date: Option<String>,
}

impl MoviePatch {
    /// Returns whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.release_date.is_none()
    }
}
