//! 核心中间件模块

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// 请求日志中间件，非 2xx 响应以 warn 级别记录
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis();

    if status.is_success() {
        info!(%method, %uri, status = status.as_u16(), elapsed_ms, "request handled");
    } else {
        warn!(%method, %uri, status = status.as_u16(), elapsed_ms, "request failed");
    }

    response
}
