//! Staff Dashboard - 员工管理终端面板
//!
//! ```text
//! staff-dashboard/src/
//! ├── app.rs      # 状态机 (按键/结果 → 命令)
//! ├── form.rs     # 新增/编辑表单
//! ├── worker.rs   # 命令执行 (HTTP)
//! └── ui.rs       # ratatui 渲染
//! ```

pub mod app;
pub mod form;
pub mod ui;
pub mod worker;

pub use app::{Command, Dashboard, Outcome};
pub use worker::Worker;
