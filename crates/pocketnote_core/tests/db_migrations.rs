use pocketnote_core::db::migrations::{apply_migrations, latest_version};
use pocketnote_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

fn user_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn fresh_database_is_migrated_to_latest() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(user_version(&conn), latest_version());

    let columns: Vec<String> = conn
        .prepare("PRAGMA table_info(notes);")
        .unwrap()
        .query_map([], |row| row.get(1))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    for expected in ["uuid", "title", "content", "created_at", "updated_at"] {
        assert!(columns.iter().any(|c| c == expected), "missing {expected}");
    }
}

#[test]
fn applying_migrations_twice_is_a_no_op() {
    let mut conn = open_db_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    assert_eq!(user_version(&conn), latest_version());
}

#[test]
fn newer_schema_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version() + 1))
            .unwrap();
    }

    let err = open_db(&path).unwrap_err();
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion { db_version, latest_supported }
            if db_version == latest_version() + 1 && latest_supported == latest_version()
    ));
}
