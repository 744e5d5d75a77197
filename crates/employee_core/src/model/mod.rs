//! Employee data shapes.
//!
//! # Responsibility
//! - Define the persisted record, the insert draft and the transfer object.
//! - Provide explicit field-by-field conversions between them.
//!
//! # Invariants
//! - A persisted `Employee` always carries a store-assigned `EmployeeId`.
//! - Conversions never invent or rewrite identifiers.

pub mod dto;
pub mod employee;
