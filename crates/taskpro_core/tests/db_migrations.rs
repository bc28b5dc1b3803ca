use rusqlite::Connection;
use taskpro_core::db::migrations::latest_version;
use taskpro_core::db::{open_db, open_db_in_memory, reset_db, DbError};
use taskpro_core::{NewTask, SqliteTaskRepository, TaskService};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "tasks");
    assert_table_exists(&conn, "weather_logs");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskpro.sqlite3");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "tasks");
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

#[test]
fn tasks_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskpro.sqlite3");

    let created = {
        let conn = open_db(&path).unwrap();
        let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());
        service
            .create_task(&NewTask::new("Persist me", "Body text"))
            .unwrap()
    };

    let conn = open_db(&path).unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());
    assert_eq!(service.get_task(created.id).unwrap(), created);
}

#[test]
fn reset_db_removes_all_rows_and_keeps_schema() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO tasks (title, content, summary) VALUES ('a', 'b', 'c');
         INSERT INTO weather_logs (city, temperature, condition) VALUES ('Oslo', '1.0°C', 'Snow');",
    )
    .unwrap();

    reset_db(&mut conn).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(row_count(&conn, "tasks"), 0);
    assert_eq!(row_count(&conn, "weather_logs"), 0);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn row_count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
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

#[test]
fn store_timestamps_have_millisecond_resolution() {
    let conn = open_db_in_memory().unwrap();

    let before = chrono::Utc::now().timestamp_millis();
    conn.execute(
        "INSERT INTO tasks (title, content, summary) VALUES ('t', 'c', 's');",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO weather_logs (city, temperature, condition) VALUES ('Oslo', '1.0°C', 'Snow');",
        [],
    )
    .unwrap();
    let after = chrono::Utc::now().timestamp_millis();

    let created_at: i64 = conn
        .query_row("SELECT created_at FROM tasks;", [], |row| row.get(0))
        .unwrap();
    let timestamp: i64 = conn
        .query_row("SELECT timestamp FROM weather_logs;", [], |row| row.get(0))
        .unwrap();

    // One ms of slack for the julianday float conversion.
    for value in [created_at, timestamp] {
        assert!(
            (before - 1..=after + 1).contains(&value),
            "{value} outside {before}..={after}"
        );
    }
}
