//! Staff Client - HTTP client for the staff server
//!
//! Typed wrappers over `/api/employees` and `/health`.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::{
    Department, Employee, EmployeeFilter, EmployeeInput, EmployeeStatus, MessageBody, SalaryValue,
};
