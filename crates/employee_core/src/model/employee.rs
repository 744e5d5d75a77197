//! Persisted employee record and its insert draft.
//!
//! # Invariants
//! - `Employee::id` is assigned by the datastore and never changes afterwards.
//! - `name` and `email` are non-blank; `salary` is a finite number.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned employee identifier.
pub type EmployeeId = i64;

/// Canonical stored employee record.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    /// Assigned on insert, immutable for the record lifetime.
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub salary: f64,
}

/// Employee data that has not been persisted yet.
///
/// Carries no identifier: identity only ever comes from the datastore.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub salary: f64,
}

/// Field presence violations detected before persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeValidationError {
    BlankName,
    BlankEmail,
    NonFiniteSalary,
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "employee name must not be blank"),
            Self::BlankEmail => write!(f, "employee email must not be blank"),
            Self::NonFiniteSalary => write!(f, "employee salary must be a finite number"),
        }
    }
}

impl Error for EmployeeValidationError {}

impl NewEmployee {
    pub fn new(name: impl Into<String>, email: impl Into<String>, salary: f64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            salary,
        }
    }

    /// Checks field presence for an insert.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        validate_fields(&self.name, &self.email, self.salary)
    }

    /// Attaches the identifier the datastore assigned on insert.
    pub fn into_persisted(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            name: self.name,
            email: self.email,
            salary: self.salary,
        }
    }
}

impl Employee {
    /// Checks field presence for an update.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        validate_fields(&self.name, &self.email, self.salary)
    }
}

fn validate_fields(name: &str, email: &str, salary: f64) -> Result<(), EmployeeValidationError> {
    if name.trim().is_empty() {
        return Err(EmployeeValidationError::BlankName);
    }
    if email.trim().is_empty() {
        return Err(EmployeeValidationError::BlankEmail);
    }
    if !salary.is_finite() {
        return Err(EmployeeValidationError::NonFiniteSalary);
    }
    Ok(())
}
