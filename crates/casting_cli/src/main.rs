//! CLI smoke entry point.
//!
//! # Responsibility
//! - Load configuration, initialize logging and open the catalog database.
//! - Print row counts, or reset the schema with `casting_cli reset`.

use casting_core::{
    init_logging_from_config, reset_schema, setup, CatalogService, CoreConfig, OpenOptions,
    SqliteActorRepository, SqliteMovieRepository,
};
use log::info;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("casting_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::from_env()?;
    init_logging_from_config(&config)?;

    println!("casting_cli version={}", env!("CARGO_PKG_VERSION"));

    let mut conn = setup(&config.database_url, OpenOptions::from(&config))?;

    match std::env::args().nth(1).as_deref() {
        Some("reset") => {
            reset_schema(&mut conn)?;
            info!("event=cli_reset module=cli status=ok");
            println!("schema reset");
        }
        Some(other) => return Err(format!("unknown command `{other}`; expected `reset`").into()),
        None => {}
    }

    let service = CatalogService::new(
        SqliteMovieRepository::try_new(&conn)?,
        SqliteActorRepository::try_new(&conn)?,
    );
    let (movies, actors) = service.counts()?;
    println!("movies={movies} actors={actors}");
    Ok(())
}
