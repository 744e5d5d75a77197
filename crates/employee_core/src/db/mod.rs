//! SQLite connections for the employee store.
//!
//! Both entry points configure pragmas, run pending migrations and confirm
//! the `employees` table is in place before the connection is handed out.

use log::{error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::{Duration, Instant};

pub mod migrations;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the employee store.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// File was migrated by a newer build than this one.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Migrations reported success but a table the store needs is absent.
    MissingTable(&'static str),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "employee store schema v{db_version} is newer than this build (v{latest_supported})"
            ),
            Self::MissingTable(table) => {
                write!(f, "employee store is missing table `{table}` after migration")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Opens (or creates) the employee store at `path`.
///
/// # Side effects
/// - Creates the file when it does not exist yet.
/// - Emits `db_open` events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens a private in-memory employee store.
///
/// Every call yields an independent, empty store.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with<F>(mode: &'static str, connect: F) -> DbResult<Connection>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();

    let result = connect()
        .map_err(DbError::from)
        .and_then(|mut conn| prepare(&mut conn).map(|()| conn));

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }
    result
}

fn prepare(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    migrations::apply_migrations(conn)?;
    migrations::ensure_employee_table(conn)
}
