use employee_core::db::migrations::latest_version;
use employee_core::db::open_db_in_memory;
use employee_core::{
    Employee, EmployeeRepository, EmployeeValidationError, NewEmployee, RepoError,
    SqliteEmployeeRepository,
};
use rusqlite::Connection;

#[test]
fn insert_assigns_increasing_identifiers() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let first = repo
        .insert(&NewEmployee::new("Ada", "ada@example.com", 1000.0))
        .unwrap();
    let second = repo
        .insert(&NewEmployee::new("Grace", "grace@example.com", 1100.0))
        .unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(repo.find_by_id(2).unwrap(), Some(second));
}

#[test]
fn find_missing_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    assert!(repo.find_by_id(1).unwrap().is_none());
}

#[test]
fn update_missing_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let ghost = Employee {
        id: 9,
        name: "Ghost".to_string(),
        email: "ghost@example.com".to_string(),
        salary: 1.0,
    };
    let err = repo.update(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(9)));

    let err = repo.delete(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(9)));
}

#[test]
fn validation_failure_blocks_insert_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let err = repo
        .insert(&NewEmployee::new("Ada", " ", 1000.0))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(EmployeeValidationError::BlankEmail)
    ));

    let mut stored = repo
        .insert(&NewEmployee::new("Ada", "ada@example.com", 1000.0))
        .unwrap();
    stored.salary = f64::NAN;
    let err = repo.update(&stored).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(EmployeeValidationError::NonFiniteSalary)
    ));
}

#[test]
fn transaction_commits_on_ok_and_rolls_back_on_err() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let kept = repo
        .transaction(|repo| repo.insert(&NewEmployee::new("Ada", "ada@example.com", 1.0)))
        .unwrap();

    let err = repo
        .transaction(|repo| {
            repo.insert(&NewEmployee::new("Grace", "grace@example.com", 2.0))?;
            Err::<(), _>(RepoError::NotFound(77))
        })
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(77)));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM employees;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(repo.find_by_id(kept.id).unwrap(), Some(kept));
}

#[test]
fn rows_written_by_other_clients_are_read_as_stored() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO employees (name, email, salary) VALUES ('', 'x@example.com', 1.0);",
        [],
    )
    .unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let stored = repo.find_by_id(1).unwrap().unwrap();
    assert_eq!(stored.name, "");
    assert_eq!(stored.email, "x@example.com");

    repo.delete(&stored).unwrap();
    assert!(repo.find_by_id(1).unwrap().is_none());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteEmployeeRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("uninitialized connection must be rejected"),
    }
}

#[test]
fn repository_rejects_missing_columns() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "CREATE TABLE employees (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
         PRAGMA user_version = {};",
        latest_version()
    ))
    .unwrap();

    match SqliteEmployeeRepository::try_new(&conn) {
        Err(RepoError::MissingRequiredColumn(column)) => assert_eq!(column, "email"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("incomplete table must be rejected"),
    }
}
