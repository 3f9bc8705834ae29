//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-record data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Update/delete targeting a missing row always return `NotFound`.
//! - Driver errors (constraint violations, I/O, locking) are passed through
//!   unmodified inside `RepoError::Db`.

pub mod actor_repo;
pub mod movie_repo;
pub mod unit_of_work;

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::{Record, RecordId};
use rusqlite::types::FromSql;
use rusqlite::{Connection, ErrorCode, Row};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for catalog persistence and query operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("{table} row not found: {id}")]
    NotFound { table: &'static str, id: RecordId },

    #[error("{table} record has no id; insert it first")]
    NotPersisted { table: &'static str },

    #[error("invalid persisted data: {0}")]
    InvalidData(String),

    #[error("connection schema version {actual_version} does not match required {expected_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },

    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),

    #[error("required column `{table}.{column}` is missing")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl RepoError {
    /// Returns whether SQLite rejected the write on a schema constraint
    /// (NOT NULL, primary key uniqueness).
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Db(DbError::Sqlite(rusqlite::Error::SqliteFailure(failure, _)))
                if failure.code == ErrorCode::ConstraintViolation
        )
    }
}

/// Returns the record id or `NotPersisted` when storage never assigned one.
pub fn require_id<R: Record>(record: &R) -> RepoResult<RecordId> {
    record
        .id()
        .ok_or(RepoError::NotPersisted { table: R::TABLE })
}

/// Verifies the connection is migrated and carries the record's table shape.
pub(crate) fn ensure_connection_ready<R: Record>(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, R::TABLE)? {
        return Err(RepoError::MissingRequiredTable(R::TABLE));
    }

    for &column in R::FIELDS {
        if !table_has_column(conn, R::TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: R::TABLE,
                column,
            });
        }
    }

    Ok(())
}

/// Reads one column, reporting values SQLite stored with the wrong type
/// as `InvalidData` instead of a driver error.
pub(crate) fn read_column<T: FromSql>(
    row: &Row<'_>,
    table: &'static str,
    column: &'static str,
) -> RepoResult<T> {
    match row.get(column) {
        Ok(value) => Ok(value),
        Err(
            rusqlite::Error::InvalidColumnType(_, _, actual)
            | rusqlite::Error::FromSqlConversionFailure(_, actual, _),
        ) => Err(RepoError::InvalidData(format!(
            "unexpected {actual} value in {table}.{column}"
        ))),
        Err(err) => Err(err.into()),
    }
}

pub(crate) fn delete_row<R: Record>(conn: &Connection, id: RecordId) -> RepoResult<()> {
    let changed = conn.execute(&format!("DELETE FROM {} WHERE id = ?1;", R::TABLE), [id])?;
    if changed == 0 {
        return Err(RepoError::NotFound {
            table: R::TABLE,
            id,
        });
    }
    Ok(())
}

pub(crate) fn count_rows<R: Record>(conn: &Connection) -> RepoResult<u64> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {};", R::TABLE), [], |row| {
        row.get(0)
    })?;
    Ok(u64::try_from(count).unwrap_or_default())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
