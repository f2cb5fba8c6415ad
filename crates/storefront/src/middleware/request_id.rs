//! `x-request-id` correlation for storefront requests.
//!
//! The CDN or load balancer in front of the site may already have tagged the
//! request; its ID is kept so edge and app logs line up. Anything else gets a
//! fresh UUID v4. The ID fills the `request_id` field that
//! `routes::make_request_span` leaves empty, tags the Sentry scope, and is
//! echoed on the response so a shopper reporting a broken page can quote it.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream ID that is reused as-is.
const MAX_UPSTREAM_ID_LEN: usize = 128;

/// Tag the request with an ID in the span, Sentry scope and response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| scope.set_tag("request_id", &request_id));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// The upstream ID if it is usable, otherwise a new UUID v4.
///
/// Usable means non-empty, at most [`MAX_UPSTREAM_ID_LEN`] bytes, and only
/// visible ASCII, so it can go into log lines and back out as a header.
fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| {
            !id.is_empty()
                && id.len() <= MAX_UPSTREAM_ID_LEN
                && id.bytes().all(|b| b.is_ascii_graphic())
        })
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_string)
}
