//! Shared types for the staff directory
//!
//! The employee model, its schema validation, list filters and the error
//! body used by both the server and its clients.

pub mod error;
pub mod models;

pub use error::{ErrorBody, ErrorCode, MessageBody};
pub use models::{
    Department, Employee, EmployeeFields, EmployeeFilter, EmployeeInput, EmployeeQuery,
    EmployeeStatus, SalaryValue, SchemaError,
};
