//! Explicit transaction scope spanning movie and actor writes.
//!
//! # Responsibility
//! - Open one SQLite transaction and hand out repositories bound to it.
//! - Let the caller commit or roll back exactly once.
//!
//! # Invariants
//! - `commit` and `rollback` consume the unit, so neither can run twice.
//! - Dropping an uncommitted unit rolls back every write made through it.

use super::actor_repo::SqliteActorRepository;
use super::movie_repo::SqliteMovieRepository;
use super::{ensure_connection_ready, RepoResult};
use crate::model::actor::Actor;
use crate::model::movie::Movie;
use log::{debug, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::time::Instant;

/// Scoped unit of work over one connection.
pub struct UnitOfWork<'conn> {
    tx: Transaction<'conn>,
    started_at: Instant,
}

impl<'conn> UnitOfWork<'conn> {
    /// Begins an immediate (write-locking) transaction.
    ///
    /// # Errors
    /// - Readiness errors when the connection is not migrated.
    /// - `RepoError::Db` when the write lock cannot be taken within the
    ///   connection's busy timeout.
    pub fn begin(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready::<Movie>(conn)?;
        ensure_connection_ready::<Actor>(conn)?;

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        debug!("event=uow_begin module=repo status=ok");
        Ok(Self {
            tx,
            started_at: Instant::now(),
        })
    }

    /// Movie repository whose writes join this unit.
    pub fn movies(&self) -> SqliteMovieRepository<'_> {
        SqliteMovieRepository::new_unchecked(&self.tx)
    }

    /// Actor repository whose writes join this unit.
    pub fn actors(&self) -> SqliteActorRepository<'_> {
        SqliteActorRepository::new_unchecked(&self.tx)
    }

    /// Commits every write made through this unit.
    pub fn commit(self) -> RepoResult<()> {
        let started_at = self.started_at;
        self.tx.commit()?;
        debug!(
            "event=uow_commit module=repo status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    /// Discards every write made through this unit.
    pub fn rollback(self) -> RepoResult<()> {
        let started_at = self.started_at;
        self.tx.rollback()?;
        debug!(
            "event=uow_rollback module=repo status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

/// Runs `work` inside a unit of work.
///
/// Commits when `work` returns `Ok`, rolls back and returns the original
/// error otherwise.
pub fn with_unit_of_work<T, F>(conn: &mut Connection, work: F) -> RepoResult<T>
where
    F: FnOnce(&UnitOfWork<'_>) -> RepoResult<T>,
{
    let unit = UnitOfWork::begin(conn)?;
    match work(&unit) {
        Ok(value) => {
            unit.commit()?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = unit.rollback() {
                warn!("event=uow_rollback module=repo status=error error={rollback_err}");
            }
            Err(err)
        }
    }
}
