//! 请求日志中间件

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// Log one line per request: id, method, route template, status, latency.
///
/// The route template (`/api/courses/{id}`) is logged instead of the raw
/// path so lines group by endpoint. 4xx/5xx go out at `warn`.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_owned();
    let method = req.method().clone();
    let route = match req.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => req.uri().path().to_owned(),
    };

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;
    if status >= 400 {
        tracing::warn!(%request_id, %method, %route, status, latency_ms, "request failed");
    } else {
        tracing::info!(%request_id, %method, %route, status, latency_ms, "request handled");
    }

    response
}
