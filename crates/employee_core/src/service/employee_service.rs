//! Employee CRUD service.
//!
//! # Responsibility
//! - Expose get/create/update/delete over transfer objects.
//! - Translate between `EmployeeDto` and persisted `Employee` records.
//!
//! # Invariants
//! - The service keeps no state between calls besides its repository.
//! - `NotFound` is the only domain failure; repository failures pass
//!   through unchanged as `Repo`.
//! - Delete performs its existence check and removal in one transaction.

use crate::model::dto::EmployeeDto;
use crate::model::employee::{EmployeeId, NewEmployee};
use crate::repo::employee_repo::{EmployeeRepository, RepoError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type EmployeeServiceResult<T> = Result<T, EmployeeServiceError>;

/// Service error for employee use-cases.
#[derive(Debug)]
pub enum EmployeeServiceError {
    /// No employee has this identifier.
    NotFound(EmployeeId),
    /// Datastore failure, untranslated.
    Repo(RepoError),
}

impl EmployeeServiceError {
    /// Returns whether this is the domain-level absence signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for EmployeeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "employee not found with id: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EmployeeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for EmployeeServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Employee service facade over a repository implementation.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service bound to `repo` for its whole lifetime.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the employee with `id`.
    ///
    /// # Errors
    /// - `NotFound(id)` when no such record exists.
    pub fn get_employee_by_id(&self, id: EmployeeId) -> EmployeeServiceResult<EmployeeDto> {
        let employee = self
            .repo
            .find_by_id(id)?
            .ok_or(EmployeeServiceError::NotFound(id))?;
        debug!("event=employee_get module=service status=ok id={id}");
        Ok(employee.into())
    }

    /// Persists a new employee and returns it with its assigned identifier.
    ///
    /// # Contract
    /// - `dto.id` is ignored; identity is always assigned by the datastore.
    /// - Calling twice with equal fields creates two records.
    pub fn create_new_employee(&self, dto: EmployeeDto) -> EmployeeServiceResult<EmployeeDto> {
        if dto.id.is_some() {
            debug!("event=employee_create module=service status=ignored_input_id");
        }

        let saved = self.repo.insert(&NewEmployee::from(dto))?;
        info!(
            "event=employee_create module=service status=ok id={}",
            saved.id
        );
        Ok(saved.into())
    }

    /// Replaces name, email and salary of the employee with `id`.
    ///
    /// # Contract
    /// - The result identifier is always `id`; `dto.id` is ignored.
    ///
    /// # Errors
    /// - `NotFound(id)` when no such record exists.
    pub fn update_employee(
        &self,
        id: EmployeeId,
        dto: EmployeeDto,
    ) -> EmployeeServiceResult<EmployeeDto> {
        let mut existing = self
            .repo
            .find_by_id(id)?
            .ok_or(EmployeeServiceError::NotFound(id))?;

        existing.apply_changes(dto);
        let updated = self.repo.update(&existing)?;
        info!("event=employee_update module=service status=ok id={id}");
        Ok(updated.into())
    }

    /// Removes the employee with `id`.
    ///
    /// The lookup and the removal commit together or not at all.
    ///
    /// # Errors
    /// - `NotFound(id)` when no such record exists; nothing is removed.
    pub fn delete_employee(&self, id: EmployeeId) -> EmployeeServiceResult<()> {
        let outcome = self.repo.transaction(|repo| {
            let employee = repo.find_by_id(id)?.ok_or(RepoError::NotFound(id))?;
            repo.delete(&employee)
        });

        match outcome {
            Ok(()) => {
                info!("event=employee_delete module=service status=ok id={id}");
                Ok(())
            }
            Err(err) => {
                warn!("event=employee_delete module=service status=error id={id} error={err}");
                Err(err.into())
            }
        }
    }
}
