//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically.
//! - Drop and recreate the catalog schema on request.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::time::Instant;

/// Tables owned by the catalog schema, in drop order.
pub const CATALOG_TABLES: &[&str] = &["actors", "movies"];

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    apply_from(&tx, current_version)?;
    tx.commit()?;

    Ok(())
}

/// Drops every catalog table and recreates the schema empty.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database was written by a newer
///   schema; nothing is dropped in that case.
///
/// # Side effects
/// - Deletes all movie and actor rows permanently.
/// - Resets auto-generated ids, so new inserts start again from 1.
/// - Emits `schema_reset` logging events with duration and status.
pub fn reset_schema(conn: &mut Connection) -> DbResult<()> {
    let started_at = Instant::now();
    info!("event=schema_reset module=db status=start");

    let result = (|| -> DbResult<()> {
        let current_version = current_user_version(conn)?;
        let latest = latest_version();
        if current_version > latest {
            return Err(DbError::UnsupportedSchemaVersion {
                db_version: current_version,
                latest_supported: latest,
            });
        }

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        for table in CATALOG_TABLES {
            tx.execute_batch(&format!("DROP TABLE IF EXISTS {table};"))?;
        }
        apply_from(&tx, 0)?;
        tx.commit()?;
        Ok(())
    })();

    match &result {
        Ok(()) => info!(
            "event=schema_reset module=db status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=schema_reset module=db status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }

    result
}

fn apply_from(tx: &Transaction<'_>, current_version: u32) -> DbResult<()> {
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    Ok(())
}

/// Reads the schema version recorded on the connection.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
