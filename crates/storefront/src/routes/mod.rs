//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /               - Landing page (index.html)
//! GET  /collection     - Collection page (collection.html)
//! GET  /health         - Health check
//! GET  /{path}         - Any other file in the site directory
//! ```
//!
//! The cart lives entirely in the shopper's browser storage, so there are no
//! cart endpoints.

pub mod pages;

use std::path::Path;

use axum::{Router, extract::Request, middleware::from_fn, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::Span;

use crate::middleware::{request_id_middleware, security_headers_middleware};

/// Create all routes for the storefront, with the request middleware stack.
///
/// Sentry layers are added by `main` so tests can build the router without a
/// Sentry client.
pub fn routes(site_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(pages::page_routes(site_dir))
        .fallback_service(ServeDir::new(site_dir))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Span for one request; `request_id` is filled in by the request ID
/// middleware.
fn make_request_span(request: &Request) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}
