//! 请求日志中间件
//!
//! 记录所有进入的 HTTP 请求，包含请求 ID、路径、员工 ID、状态码和延迟

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};

/// 请求日志中间件
///
/// 请求 ID 由外层的 `SetRequestIdLayer` 写入 `x-request-id`。
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let employee_id = employee_id(&path, uri.path()).unwrap_or("-").to_string();

    let response = next.run(req).await;

    let latency = start.elapsed();
    let status = response.status();

    // 根据状态码使用不同级别记录日志
    if status.is_server_error() || status.is_client_error() {
        warn!(
            target: "http_access",
            request_id = %request_id,
            method = %method,
            path = %path,
            employee_id = %employee_id,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            "Request failed"
        );
    } else {
        info!(
            target: "http_access",
            request_id = %request_id,
            method = %method,
            path = %path,
            employee_id = %employee_id,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            "Request completed"
        );
    }

    response
}

/// `/api/employees/{id}` 上的员工 id (已匹配路由的最后一段)
fn employee_id<'a>(matched: &str, path: &'a str) -> Option<&'a str> {
    if matched != "/api/employees/{id}" {
        return None;
    }
    path.rsplit('/').next().filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_id_taken_from_item_routes() {
        assert_eq!(
            employee_id("/api/employees/{id}", "/api/employees/7f3a"),
            Some("7f3a")
        );
        assert_eq!(employee_id("/api/employees", "/api/employees"), None);
        assert_eq!(employee_id("/health", "/health"), None);
    }
}
