use officials_core::db::migrations::latest_version;
use officials_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "officials");
    assert_table_exists(&conn, "systems");
    assert_table_exists(&conn, "official_roles");
    assert_table_exists(&conn, "inventory");
    assert_table_exists(&conn, "official_events");
    assert_column_exists(&conn, "official_events", "origin");
}

#[test]
fn foreign_keys_are_enforced_on_returned_connections() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);

    let orphan = conn.execute(
        "INSERT INTO official_events (id, official_id, event_type, scheduled_at, created_at)
         VALUES ('e1', 'missing-official', 'FOLLOW_UP', 0, 0);",
        [],
    );
    assert!(orphan.is_err());
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("officials.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "officials");
}

#[test]
fn event_rows_require_a_provenance_key() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(latest_version(), 1);
    conn.execute_batch(
        "INSERT INTO officials (id, full_name, document_id, position, procedure, status, entry_date, created_at)
         VALUES ('o1', 'Ana', 'D-1', 'Analyst', 'Contest', 'PROVISIONAL', '2024-01-15', 0);",
    )
    .unwrap();

    let without_origin = conn.execute(
        "INSERT INTO official_events (id, official_id, event_type, scheduled_at, created_at)
         VALUES ('e1', 'o1', 'ANNUAL_EVALUATION', 0, 0);",
        [],
    );
    assert!(without_origin.is_err());

    conn.execute(
        "INSERT INTO official_events (id, official_id, event_type, scheduled_at, origin, created_at)
         VALUES ('e2', 'o1', 'ANNUAL_EVALUATION', 0, 'official_created', 0);",
        [],
    )
    .unwrap();
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

fn assert_column_exists(conn: &Connection, table_name: &str, column: &str) {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table_name});"))
        .unwrap();
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert!(
        columns.iter().any(|name| name == column),
        "column {table_name}.{column} does not exist"
    );
}
