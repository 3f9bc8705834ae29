//! Data-access layer for the casting catalog.
//! Defines the `movies` and `actors` records and their SQLite persistence.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use db::{reset_schema, setup, DbError, DbResult, OpenOptions};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::actor::{Actor, ActorPatch};
pub use model::movie::{Movie, MoviePatch};
pub use model::{Record, RecordId};
pub use repo::actor_repo::{ActorRepository, SqliteActorRepository};
pub use repo::movie_repo::{MovieRepository, SqliteMovieRepository};
pub use repo::unit_of_work::{with_unit_of_work, UnitOfWork};
pub use repo::{RepoError, RepoResult};
pub use service::catalog_service::CatalogService;
