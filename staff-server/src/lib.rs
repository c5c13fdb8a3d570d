//! Staff Server - 员工档案管理服务
//!
//! # 架构概述
//!
//! - **数据库** (`db`): SurrealDB 存储、schema、仓储
//! - **HTTP API** (`api`): RESTful 员工接口与健康检查
//! - **核心** (`core`): 配置、状态、服务器生命周期
//!
//! # 模块结构
//!
//! ```text
//! staff-server/src/
//! ├── core/          # 配置、状态、错误
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由装配与中间件栈
//! ├── middleware/    # 请求日志
//! ├── utils/         # 错误、日志
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod routes;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, DatabaseConfig, Server, ServerError, ServerState};
pub use db::DbService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 加载 `.env`、读取配置并初始化日志
pub fn setup_environment() -> Config {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );

    if dotenv_loaded {
        tracing::debug!("Loaded environment from .env");
    }
    config
}

pub fn print_banner() {
    println!(
        r#"
   _____ __        ________
  / ___// /_____ _/ __/ __/
  \__ \/ __/ __ `/ /_/ /_
 ___/ / /_/ /_/ / __/ __/
/____/\__/\__,_/_/ /_/
    "#
    );
}
