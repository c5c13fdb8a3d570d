//! API 路由模块
//!
//! - [`health`] - 健康检查
//! - [`employees`] - 员工管理接口

pub mod employees;
pub mod health;

pub use crate::utils::AppResult;
