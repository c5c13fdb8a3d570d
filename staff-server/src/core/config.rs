/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (`.env` 文件会在启动时加载)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | DATABASE_URL | rocksdb://data/staff.db | SurrealDB 连接串 |
/// | DATABASE_NS | staff | 命名空间 |
/// | DATABASE_NAME | staff | 数据库名 |
/// | DATABASE_USER / DATABASE_PASS | - | 远程引擎的 root 凭据 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | - | 日志文件目录 (按天滚动) |
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=mem:// HTTP_PORT=8080 cargo run -p staff-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 数据库连接配置
    pub database: DatabaseConfig,
    /// 运行环境: development | production
    pub environment: String,
    /// 日志级别 (trace | debug | info | warn | error)
    pub log_level: String,
    /// 是否输出 JSON 格式日志
    pub log_json: bool,
    /// 日志文件目录
    pub log_dir: Option<String>,
}

/// 数据库连接配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 连接串，决定存储引擎 (mem:// | rocksdb://path | ws://host:port)
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DATABASE_URL").unwrap_or_else(|_| "rocksdb://data/staff.db".into()),
            namespace: std::env::var("DATABASE_NS").unwrap_or_else(|_| "staff".into()),
            database: std::env::var("DATABASE_NAME").unwrap_or_else(|_| "staff".into()),
            username: std::env::var("DATABASE_USER").ok(),
            password: std::env::var("DATABASE_PASS").ok(),
        }
    }

    /// 内存数据库 (测试用)
    pub fn in_memory() -> Self {
        Self {
            url: "mem://".into(),
            namespace: "staff".into(),
            database: "staff".into(),
            username: None,
            password: None,
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            database: DatabaseConfig::from_env(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(database_url: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.database.url = database_url.into();
        config.http_port = http_port;
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
