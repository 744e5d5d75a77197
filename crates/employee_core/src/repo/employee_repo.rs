//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide find/insert/update/delete over the `employees` table.
//! - Expose a transactional scope for multi-step operations.
//!
//! # Invariants
//! - Identifiers come from SQLite `AUTOINCREMENT` and are never reused.
//! - `update` touches only `name`, `email`, `salary` and `updated_at`.
//! - Field presence is checked on writes only; stored rows are read as-is so
//!   rows written by other clients stay reachable.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeId, EmployeeValidationError, NewEmployee};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    salary
FROM employees";

const REQUIRED_COLUMNS: [&str; 6] = ["id", "name", "email", "salary", "created_at", "updated_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from employee persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// No row with this identifier exists.
    NotFound(EmployeeId),
    /// Field presence check failed before writing.
    Validation(EmployeeValidationError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required column is missing from the `employees` table.
    MissingRequiredColumn(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found with id: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "employee repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredColumn(column) => write!(
                f,
                "employee repository requires column `{column}` in table `employees`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredColumn(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<EmployeeValidationError> for RepoError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Datastore contract used by `EmployeeService`.
pub trait EmployeeRepository {
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;

    /// Persists a new record and returns it with its assigned identifier.
    fn insert(&self, employee: &NewEmployee) -> RepoResult<Employee>;

    /// Overwrites the mutable fields of an existing record.
    fn update(&self, employee: &Employee) -> RepoResult<Employee>;

    fn delete(&self, employee: &Employee) -> RepoResult<()>;

    /// Runs `work` as one atomic unit.
    ///
    /// Changes made through `self` inside `work` are committed when it returns
    /// `Ok` and rolled back when it returns `Err`.
    fn transaction<T, F>(&self, work: F) -> RepoResult<T>
    where
        F: FnOnce(&Self) -> RepoResult<T>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Creates a repository over a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredColumn` when the table shape does not match.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(map_employee_row(row)?));
        }

        Ok(None)
    }

    fn insert(&self, employee: &NewEmployee) -> RepoResult<Employee> {
        employee.validate()?;

        self.conn.execute(
            "INSERT INTO employees (name, email, salary) VALUES (?1, ?2, ?3);",
            params![employee.name.as_str(), employee.email.as_str(), employee.salary],
        )?;

        Ok(employee.clone().into_persisted(self.conn.last_insert_rowid()))
    }

    fn update(&self, employee: &Employee) -> RepoResult<Employee> {
        employee.validate()?;

        let changed = self.conn.execute(
            "UPDATE employees
             SET
                name = ?1,
                email = ?2,
                salary = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?4;",
            params![
                employee.name.as_str(),
                employee.email.as_str(),
                employee.salary,
                employee.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(employee.id));
        }

        Ok(employee.clone())
    }

    fn delete(&self, employee: &Employee) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", [employee.id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(employee.id));
        }

        Ok(())
    }

    fn transaction<T, F>(&self, work: F) -> RepoResult<T>
    where
        F: FnOnce(&Self) -> RepoResult<T>,
    {
        // Already inside a transaction: join it instead of nesting.
        if !self.conn.is_autocommit() {
            return work(self);
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        // Dropping `tx` on the error path rolls back.
        let value = work(self)?;
        tx.commit()?;
        Ok(value)
    }
}

fn map_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        salary: row.get("salary")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for column in REQUIRED_COLUMNS {
        if !table_has_column(conn, "employees", column)? {
            return Err(RepoError::MissingRequiredColumn(column));
        }
    }

    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let found: Option<i64> = conn
        .query_row(
            &format!("SELECT 1 FROM pragma_table_info('{table}') WHERE name = ?1;"),
            [column],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}
