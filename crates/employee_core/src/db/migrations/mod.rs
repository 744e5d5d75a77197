//! Employee store schema steps.
//!
//! Steps run in ascending `version` order inside one transaction, and the
//! reached version is stored in `PRAGMA user_version`. A file whose version is
//! ahead of `latest_version()` is refused rather than downgraded.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;
use std::time::Instant;

const EMPLOYEE_TABLE: &str = "employees";

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "create_employees",
    sql: include_str!("0001_init.sql"),
}];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Schema version currently recorded in the store.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings the store up to `latest_version()`.
///
/// Either every pending step lands or none does.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = schema_version(conn)?;
    let target = latest_version();
    if from > target {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: target,
        });
    }

    let pending: Vec<&SchemaStep> = STEPS.iter().filter(|step| step.version > from).collect();
    if pending.is_empty() {
        debug!("event=db_migrate module=db status=skipped version={from}");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        let started_at = Instant::now();
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=db_migrate_step module=db status=ok version={} name={} duration_ms={}",
            step.version,
            step.name,
            started_at.elapsed().as_millis()
        );
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from} to_version={target}");
    Ok(())
}

/// Fails with `MissingTable` unless the `employees` table exists.
pub fn ensure_employee_table(conn: &Connection) -> DbResult<()> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [EMPLOYEE_TABLE],
        |row| row.get(0),
    )?;
    if exists {
        Ok(())
    } else {
        Err(DbError::MissingTable(EMPLOYEE_TABLE))
    }
}
