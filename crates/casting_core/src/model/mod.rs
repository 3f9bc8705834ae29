//! Catalog domain model.
//!
//! # Responsibility
//! - Define plain data records for the `movies` and `actors` tables.
//! - Provide the JSON-ready `format()` projection shared by every record.
//!
//! # Invariants
//! - `id` is `None` until storage assigns it on first insert.
//! - Records carry no persistence behavior; see `crate::repo`.

pub mod actor;
pub mod movie;

use serde_json::{Map, Value};

/// Storage-assigned primary key.
pub type RecordId = i64;

/// Capabilities shared by every catalog record.
pub trait Record {
    /// Backing table name.
    const TABLE: &'static str;

    /// Column names in `format()` key order, `id` first.
    const FIELDS: &'static [&'static str];

    /// Primary key, once persisted.
    fn id(&self) -> Option<RecordId>;

    /// Field name to value mapping, including `id` (null before insert).
    fn format(&self) -> Map<String, Value>;
}
