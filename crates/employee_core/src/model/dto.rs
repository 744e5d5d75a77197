//! Transfer representation crossing the service boundary.
//!
//! Conversions here are the only place where fields move between the
//! persisted and the transfer shape.

use super::employee::{Employee, EmployeeId, NewEmployee};
use serde::{Deserialize, Serialize};

/// Employee data exchanged with service callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDto {
    /// Optional on input and ignored by create/update; always set on output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,
    pub name: String,
    pub email: String,
    pub salary: f64,
}

impl EmployeeDto {
    /// Builds an input transfer object without identifier.
    pub fn new(name: impl Into<String>, email: impl Into<String>, salary: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            salary,
        }
    }
}

impl From<Employee> for EmployeeDto {
    fn from(value: Employee) -> Self {
        Self {
            id: Some(value.id),
            name: value.name,
            email: value.email,
            salary: value.salary,
        }
    }
}

/// Drops any caller-supplied identifier; the datastore assigns identity.
impl From<EmployeeDto> for NewEmployee {
    fn from(value: EmployeeDto) -> Self {
        Self {
            name: value.name,
            email: value.email,
            salary: value.salary,
        }
    }
}

impl Employee {
    /// Copies the mutable fields from `changes`, keeping `self.id`.
    pub fn apply_changes(&mut self, changes: EmployeeDto) {
        self.name = changes.name;
        self.email = changes.email;
        self.salary = changes.salary;
    }
}
