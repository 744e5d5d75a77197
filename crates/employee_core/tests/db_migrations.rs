use employee_core::db::migrations::{latest_version, schema_version};
use employee_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "employees");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO employees (name, email, salary) VALUES ('Ada', 'ada@example.com', 1.0);",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second).unwrap(), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM employees;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
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
fn reopening_without_employee_table_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dropped.db");

    let conn = open_db(&path).unwrap();
    conn.execute_batch("DROP TABLE employees;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::MissingTable("employees")));
}

#[test]
fn employees_table_has_no_secondary_indexes() {
    let conn = open_db_in_memory().unwrap();
    let explicit_indexes: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type = 'index' AND tbl_name = 'employees' AND sql IS NOT NULL;",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(explicit_indexes, 0);
}

#[test]
fn reopening_current_schema_keeps_version() {
    let mut conn = open_db_in_memory().unwrap();
    employee_core::db::migrations::apply_migrations(&mut conn).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
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
