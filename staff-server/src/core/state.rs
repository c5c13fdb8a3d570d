use std::time::{Duration, Instant};

use axum::body::Body;
use http::{Request, Response};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use tower::ServiceExt;

use crate::core::{Config, Result};
use crate::db::DbService;
use crate::db::repository::EmployeeRepository;

/// 服务器状态
///
/// 持有配置和进程级的数据库连接。连接在启动时建立一次，
/// 进程退出时释放；`Surreal<Any>` 内部是 Arc，克隆成本极低。
#[derive(Clone)]
pub struct ServerState {
    /// 配置项 (不可变)
    pub config: Config,
    /// 数据库连接
    pub db: Surreal<Any>,
    started_at: Instant,
}

impl ServerState {
    /// 连接数据库并构建状态
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::connect(&config.database).await?;
        Ok(Self::with_db(config.clone(), db))
    }

    /// 使用已打开的数据库构建状态
    pub fn with_db(config: Config, db: DbService) -> Self {
        Self {
            config,
            db: db.db,
            started_at: Instant::now(),
        }
    }

    pub fn employees(&self) -> EmployeeRepository {
        EmployeeRepository::new(self.db.clone())
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// 不经过网络栈直接调用完整路由 (含中间件)
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        let app = crate::routes::build_app().with_state(self.clone());
        match app.oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }
}

