use casting_core::db::migrations::latest_version;
use casting_core::db::open_db_in_memory;
use casting_core::{Movie, MovieRepository, Record, RepoError, SqliteMovieRepository};
use rusqlite::Connection;
use serde_json::json;
use std::collections::HashSet;

#[test]
fn insert_assigns_id_and_format_reflects_it() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let mut movie = Movie::new("Up", "2009-05-29");
    let id = repo.insert_movie(&mut movie).unwrap();

    assert_eq!(movie.id, Some(id));
    assert_eq!(
        serde_json::Value::Object(movie.format()),
        json!({"id": id, "title": "Up", "release_date": "2009-05-29"})
    );
}

#[test]
fn inserted_ids_are_unique() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let mut seen = HashSet::new();
    for index in 0..5 {
        let mut movie = Movie::new(format!("Movie {index}"), "2001-01-01");
        assert!(seen.insert(repo.insert_movie(&mut movie).unwrap()));
    }
    assert_eq!(repo.count_movies().unwrap(), 5);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let mut first = Movie::new("Up", "2009-05-29");
    let first_id = repo.insert_movie(&mut first).unwrap();
    repo.delete_movie(first_id).unwrap();

    let mut second = Movie::new("Coco", "2017-11-22");
    let second_id = repo.insert_movie(&mut second).unwrap();
    assert!(second_id > first_id);
}

#[test]
fn update_is_visible_to_fresh_lookup() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let mut movie = Movie::new("Up", "2009-05-29");
    let id = repo.insert_movie(&mut movie).unwrap();

    let mut loaded = repo.get_movie(id).unwrap().unwrap();
    loaded.title = "Last for One".to_string();
    repo.update_movie(&loaded).unwrap();

    let reloaded = repo.get_movie(id).unwrap().unwrap();
    assert_eq!(reloaded.title, "Last for One");
    assert_eq!(reloaded.release_date, "2009-05-29");
    assert_eq!(reloaded.id, Some(id));
}

#[test]
fn update_without_id_returns_not_persisted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let err = repo.update_movie(&Movie::new("Up", "2009-05-29")).unwrap_err();
    assert!(matches!(err, RepoError::NotPersisted { table: "movies" }));
}

#[test]
fn update_missing_row_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let mut movie = Movie::new("Up", "2009-05-29");
    movie.id = Some(42);
    let err = repo.update_movie(&movie).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            table: "movies",
            id: 42
        }
    ));
}

#[test]
fn delete_removes_row_and_second_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let mut movie = Movie::new("Up", "2009-05-29");
    let id = repo.insert_movie(&mut movie).unwrap();

    repo.delete_movie(id).unwrap();
    assert!(repo.get_movie(id).unwrap().is_none());

    let err = repo.delete_movie(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { table: "movies", id: missing } if missing == id));
}

#[test]
fn insert_with_existing_id_is_a_constraint_violation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let mut original = Movie::new("Up", "2009-05-29");
    let id = repo.insert_movie(&mut original).unwrap();

    let mut duplicate = Movie::new("Cars", "2006-06-09");
    duplicate.id = Some(id);
    let err = repo.insert_movie(&mut duplicate).unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {err}");
    assert_eq!(repo.get_movie(id).unwrap().unwrap().title, "Up");
}

#[test]
fn insert_with_unused_explicit_id_keeps_it() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let mut movie = Movie::new("Up", "2009-05-29");
    movie.id = Some(100);
    assert_eq!(repo.insert_movie(&mut movie).unwrap(), 100);
    assert!(repo.get_movie(100).unwrap().is_some());
}

#[test]
fn null_required_column_is_a_constraint_violation() {
    let conn = open_db_in_memory().unwrap();

    let err = conn
        .execute(
            "INSERT INTO movies (title, release_date) VALUES ('Up', NULL);",
            [],
        )
        .map_err(RepoError::from)
        .unwrap_err();
    assert!(err.is_constraint_violation());
}

#[test]
fn list_returns_movies_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    for title in ["Up", "Coco", "Soul"] {
        repo.insert_movie(&mut Movie::new(title, "2000-01-01"))
            .unwrap();
    }

    let titles: Vec<_> = repo
        .list_movies()
        .unwrap()
        .into_iter()
        .map(|movie| movie.title)
        .collect();
    assert_eq!(titles, ["Up", "Coco", "Soul"]);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteMovieRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_movies_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteMovieRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("movies"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE movies (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteMovieRepository::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "movies",
            column: "release_date"
        })
    ));
}
