//! Movie repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/update/delete/lookup over the `movies` table.
//! - Write the storage-assigned id back into inserted movies.
//!
//! # Invariants
//! - Outside a unit of work every write commits before returning.
//! - `id` is never rewritten by `update_movie`.

use super::{
    count_rows, delete_row, ensure_connection_ready, read_column, require_id, RepoError,
    RepoResult,
};
use crate::model::movie::Movie;
use crate::model::{Record, RecordId};
use log::debug;
use rusqlite::{params, Connection, Row};

const MOVIE_SELECT_SQL: &str = "SELECT
    id,
    title,
    release_date
FROM movies";

/// Repository interface for movie persistence.
pub trait MovieRepository {
    /// Inserts `movie` and stores the assigned id on it.
    fn insert_movie(&self, movie: &mut Movie) -> RepoResult<RecordId>;
    /// Writes every field of a persisted movie to its row.
    fn update_movie(&self, movie: &Movie) -> RepoResult<()>;
    /// Removes the row with `id`.
    fn delete_movie(&self, id: RecordId) -> RepoResult<()>;
    fn get_movie(&self, id: RecordId) -> RepoResult<Option<Movie>>;
    /// Lists all movies ordered by id.
    fn list_movies(&self) -> RepoResult<Vec<Movie>>;
    fn count_movies(&self) -> RepoResult<u64>;
}

/// SQLite-backed movie repository.
pub struct SqliteMovieRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMovieRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready::<Movie>(conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn new_unchecked(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl MovieRepository for SqliteMovieRepository<'_> {
    fn insert_movie(&self, movie: &mut Movie) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO movies (id, title, release_date) VALUES (?1, ?2, ?3);",
            params![movie.id, movie.title.as_str(), movie.release_date.as_str()],
        )?;

        let id = self.conn.last_insert_rowid();
        movie.id = Some(id);
        debug!("event=record_insert module=repo table=movies id={id}");
        Ok(id)
    }

    fn update_movie(&self, movie: &Movie) -> RepoResult<()> {
        let id = require_id(movie)?;
        let changed = self.conn.execute(
            "UPDATE movies
             SET
                title = ?1,
                release_date = ?2
             WHERE id = ?3;",
            params![movie.title.as_str(), movie.release_date.as_str(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: Movie::TABLE,
                id,
            });
        }

        debug!("event=record_update module=repo table=movies id={id}");
        Ok(())
    }

    fn delete_movie(&self, id: RecordId) -> RepoResult<()> {
        delete_row::<Movie>(self.conn, id)?;
        debug!("event=record_delete module=repo table=movies id={id}");
        Ok(())
    }

    fn get_movie(&self, id: RecordId) -> RepoResult<Option<Movie>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MOVIE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_movie_row(row)?));
        }

        Ok(None)
    }

    fn list_movies(&self) -> RepoResult<Vec<Movie>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MOVIE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut movies = Vec::new();
        while let Some(row) = rows.next()? {
            movies.push(parse_movie_row(row)?);
        }

        Ok(movies)
    }

    fn count_movies(&self) -> RepoResult<u64> {
        count_rows::<Movie>(self.conn)
    }
}

fn parse_movie_row(row: &Row<'_>) -> RepoResult<Movie> {
    Ok(Movie {
        id: Some(read_column(row, Movie::TABLE, "id")?),
        title: read_column(row, Movie::TABLE, "title")?,
        release_date: read_column(row, Movie::TABLE, "release_date")?,
    })
}
