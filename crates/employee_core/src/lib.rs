//! Employee CRUD core.
//! Owns the employee record shapes, the SQLite-backed store and the service
//! callers go through.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, parse_log_level};
pub use model::dto::EmployeeDto;
pub use model::employee::{Employee, EmployeeId, EmployeeValidationError, NewEmployee};
pub use repo::employee_repo::{EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository};
pub use service::employee_service::{
    EmployeeService, EmployeeServiceError, EmployeeServiceResult,
};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
