//! Catalog use-case service.
//!
//! # Responsibility
//! - Provide create/patch/delete/list entry points for movies and actors.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::actor::{Actor, ActorPatch};
use crate::model::movie::{Movie, MoviePatch};
use crate::model::{Record, RecordId};
use crate::repo::actor_repo::ActorRepository;
use crate::repo::movie_repo::MovieRepository;
use crate::repo::{require_id, RepoError, RepoResult};
use serde_json::{Map, Value};

/// Use-case service over movie and actor repositories.
pub struct CatalogService<M: MovieRepository, A: ActorRepository> {
    movies: M,
    actors: A,
}

impl<M: MovieRepository, A: ActorRepository> CatalogService<M, A> {
    pub fn new(movies: M, actors: A) -> Self {
        Self { movies, actors }
    }

    /// Creates a movie and returns it with its assigned id.
    pub fn create_movie(
        &self,
        title: impl Into<String>,
        release_date: impl Into<String>,
    ) -> RepoResult<Movie> {
        let mut movie = Movie::new(title, release_date);
        self.movies.insert_movie(&mut movie)?;
        Ok(movie)
    }

    /// Loads a movie, applies `patch` and persists the result.
    ///
    /// An empty patch still checks existence and returns the stored movie.
    pub fn patch_movie(&self, id: RecordId, patch: MoviePatch) -> RepoResult<Movie> {
        let mut movie = self.movies.get_movie(id)?.ok_or(RepoError::NotFound {
            table: Movie::TABLE,
            id,
        })?;
        if patch.is_empty() {
            return Ok(movie);
        }
        movie.apply(patch);
        self.movies.update_movie(&movie)?;
        Ok(movie)
    }

    /// Deletes the row behind a persisted movie instance.
    pub fn remove_movie(&self, movie: &Movie) -> RepoResult<()> {
        self.movies.delete_movie(require_id(movie)?)
    }

    pub fn delete_movie(&self, id: RecordId) -> RepoResult<()> {
        self.movies.delete_movie(id)
    }

    pub fn get_movie(&self, id: RecordId) -> RepoResult<Option<Movie>> {
        self.movies.get_movie(id)
    }

    /// Lists every movie in its `format()` projection.
    pub fn list_movies_formatted(&self) -> RepoResult<Vec<Map<String, Value>>> {
        Ok(formatted(self.movies.list_movies()?))
    }

    /// Creates an actor and returns it with its assigned id.
    pub fn create_actor(
        &self,
        name: impl Into<String>,
        age: i64,
        gender: impl Into<String>,
    ) -> RepoResult<Actor> {
        let mut actor = Actor::new(name, age, gender);
        self.actors.insert_actor(&mut actor)?;
        Ok(actor)
    }

    /// Loads an actor, applies `patch` and persists the result.
    pub fn patch_actor(&self, id: RecordId, patch: ActorPatch) -> RepoResult<Actor> {
        let mut actor = self.actors.get_actor(id)?.ok_or(RepoError::NotFound {
            table: Actor::TABLE,
            id,
        })?;
        if patch.is_empty() {
            return Ok(actor);
        }
        actor.apply(patch);
        self.actors.update_actor(&actor)?;
        Ok(actor)
    }

    pub fn remove_actor(&self, actor: &Actor) -> RepoResult<()> {
        self.actors.delete_actor(require_id(actor)?)
    }

    pub fn delete_actor(&self, id: RecordId) -> RepoResult<()> {
        self.actors.delete_actor(id)
    }

    pub fn get_actor(&self, id: RecordId) -> RepoResult<Option<Actor>> {
        self.actors.get_actor(id)
    }

    pub fn list_actors_formatted(&self) -> RepoResult<Vec<Map<String, Value>>> {
        Ok(formatted(self.actors.list_actors()?))
    }

    /// Returns `(movies, actors)` row counts.
    pub fn counts(&self) -> RepoResult<(u64, u64)> {
        Ok((self.movies.count_movies()?, self.actors.count_actors()?))
    }
}

fn formatted<R: Record>(records: Vec<R>) -> Vec<Map<String, Value>> {
    records.iter().map(|record| record.format()).collect()
}
