//! HTTP API
//!
//! One module per entity: `mod.rs` wires the routes, `handler.rs` binds
//! each route to a service call and picks the status code.

pub mod authors;
pub mod courses;
pub mod extractor;
pub mod health;
pub mod modules;
pub mod purchased_courses;
pub mod students;

pub use extractor::{ApiPath, ValidatedJson};

use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use crate::middleware;

/// Request ID generator (UUID v4)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(authors::router())
        .merge(courses::router())
        .merge(modules::router())
        .merge(students::router())
        .merge(purchased_courses::router())
        .merge(health::router())
}

/// Build a fully configured application with all middleware
///
/// Used by the HTTP server and by the integration tests.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    let request_id = HeaderName::from_static("x-request-id");

    build_router()
        // ========== Tower HTTP Middleware ==========
        .layer(TimeoutLayer::new(Duration::from_millis(
            state.config.request_timeout_ms,
        )))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        // ========== Request ID ==========
        // Set wraps Propagate: the id must exist before it is copied out
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, XRequestId))
}
