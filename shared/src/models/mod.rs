//! Data Models

pub mod employee;

pub use employee::{
    Department, Employee, EmployeeFields, EmployeeFilter, EmployeeInput, EmployeeQuery,
    EmployeeStatus, SalaryValue, SchemaError, UnknownVariant,
};
