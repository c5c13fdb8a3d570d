//! Employee API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/employees | GET | 列表 (name / department / status 过滤) |
//! | /api/employees | POST | 创建 (201) |
//! | /api/employees/{id} | GET | 详情 |
//! | /api/employees/{id} | PUT | 整体替换 |
//! | /api/employees/{id} | DELETE | 删除 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
