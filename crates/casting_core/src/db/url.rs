//! Connection string parsing.
//!
//! Accepted forms:
//! - `sqlite::memory:` or `:memory:` for a private in-memory database.
//! - `sqlite://<path>` and `sqlite:<path>` for a database file.
//! - A bare filesystem path.

use super::{DbError, DbResult};
use std::path::PathBuf;

const SQLITE_SCHEME: &str = "sqlite:";

/// Resolved storage location for a connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    Memory,
    File(PathBuf),
}

impl DatabaseTarget {
    /// Parses a `DATABASE_URL`-style connection string.
    pub fn parse(url: &str) -> DbResult<Self> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(invalid(url, "connection string is empty"));
        }

        let rest = match strip_scheme(trimmed) {
            Some(rest) => rest.strip_prefix("//").unwrap_or(rest),
            None if trimmed.contains("://") => {
                return Err(invalid(url, "only sqlite connection strings are supported"));
            }
            None => trimmed,
        };

        // Query parameters such as `?mode=rwc` are not interpreted.
        let path = rest.split('?').next().unwrap_or_default();
        match path {
            "" => Err(invalid(url, "database path is empty")),
            ":memory:" => Ok(Self::Memory),
            other => Ok(Self::File(PathBuf::from(other))),
        }
    }

    /// Short label used in log events.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File(_) => "file",
        }
    }
}

// Schemes are case-insensitive; the path keeps its case.
fn strip_scheme(url: &str) -> Option<&str> {
    let scheme = url.get(..SQLITE_SCHEME.len())?;
    if scheme.eq_ignore_ascii_case(SQLITE_SCHEME) {
        url.get(SQLITE_SCHEME.len()..)
    } else {
        None
    }
}

fn invalid(url: &str, reason: &'static str) -> DbError {
    DbError::InvalidUrl {
        url: url.to_string(),
        reason,
    }
}
