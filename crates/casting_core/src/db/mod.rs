//! SQLite storage bootstrap and schema entry points.
//!
//! # Responsibility
//! - Resolve connection strings and open configured SQLite connections.
//! - Apply schema migrations in deterministic order.
//! - Provide the destructive schema reset used by tests and initialization.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Repositories must not read/write catalog data before migrations succeed.

pub mod migrations;
mod open;
mod url;

pub use migrations::reset_schema;
pub use open::{open_db, open_db_in_memory, open_db_with_options, setup, OpenOptions};
pub use url::DatabaseTarget;

pub type DbResult<T> = Result<T, DbError>;

/// Storage bootstrap error.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },

    #[error("invalid database url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: &'static str },
}
