//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into caller-facing operations.
//! - Keep callers decoupled from storage details and record shapes.

pub mod employee_service;
