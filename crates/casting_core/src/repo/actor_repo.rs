//! Actor repository contract and SQLite implementation.
//!
//! Mirrors the movie repository over the `actors` table.

use super::{
    count_rows, delete_row, ensure_connection_ready, read_column, require_id, RepoError,
    RepoResult,
};
use crate::model::actor::Actor;
use crate::model::{Record, RecordId};
use log::debug;
use rusqlite::{params, Connection, Row};

const ACTOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    age,
    gender
FROM actors";

/// Repository interface for actor persistence.
pub trait ActorRepository {
    /// Inserts `actor` and stores the assigned id on it.
    fn insert_actor(&self, actor: &mut Actor) -> RepoResult<RecordId>;
    fn update_actor(&self, actor: &Actor) -> RepoResult<()>;
    fn delete_actor(&self, id: RecordId) -> RepoResult<()>;
    fn get_actor(&self, id: RecordId) -> RepoResult<Option<Actor>>;
    fn list_actors(&self) -> RepoResult<Vec<Actor>>;
    fn count_actors(&self) -> RepoResult<u64>;
}

/// SQLite-backed actor repository.
pub struct SqliteActorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActorRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready::<Actor>(conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn new_unchecked(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ActorRepository for SqliteActorRepository<'_> {
    fn insert_actor(&self, actor: &mut Actor) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO actors (id, name, age, gender) VALUES (?1, ?2, ?3, ?4);",
            params![
                actor.id,
                actor.name.as_str(),
                actor.age,
                actor.gender.as_str()
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        actor.id = Some(id);
        debug!("event=record_insert module=repo table=actors id={id}");
        Ok(id)
    }

    fn update_actor(&self, actor: &Actor) -> RepoResult<()> {
        let id = require_id(actor)?;
        let changed = self.conn.execute(
            "UPDATE actors
             SET
                name = ?1,
                age = ?2,
                gender = ?3
             WHERE id = ?4;",
            params![actor.name.as_str(), actor.age, actor.gender.as_str(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: Actor::TABLE,
                id,
            });
        }

        debug!("event=record_update module=repo table=actors id={id}");
        Ok(())
    }

    fn delete_actor(&self, id: RecordId) -> RepoResult<()> {
        delete_row::<Actor>(self.conn, id)?;
        debug!("event=record_delete module=repo table=actors id={id}");
        Ok(())
    }

    fn get_actor(&self, id: RecordId) -> RepoResult<Option<Actor>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACTOR_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_actor_row(row)?));
        }

        Ok(None)
    }

    fn list_actors(&self) -> RepoResult<Vec<Actor>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACTOR_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut actors = Vec::new();
        while let Some(row) = rows.next()? {
            actors.push(parse_actor_row(row)?);
        }

        Ok(actors)
    }

    fn count_actors(&self) -> RepoResult<u64> {
        count_rows::<Actor>(self.conn)
    }
}

fn parse_actor_row(row: &Row<'_>) -> RepoResult<Actor> {
    Ok(Actor {
        id: Some(read_column(row, Actor::TABLE, "id")?),
        name: read_column(row, Actor::TABLE, "name")?,
        age: read_column(row, Actor::TABLE, "age")?,
        gender: read_column(row, Actor::TABLE, "gender")?,
    })
}
