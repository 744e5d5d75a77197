//! Repository layer: the datastore collaborator of the employee service.
//!
//! # Responsibility
//! - Define the data access contract the service depends on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Write paths validate field presence before SQL mutations.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod employee_repo;
