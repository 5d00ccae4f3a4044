//! Request inspection and request-ID plumbing.
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The forwarded-address header is trusted as-is; deployments must sit
//!   behind a proxy that overwrites it

use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, Request};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tracing::Span;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Bucket shared by every client that arrives without a forwarded address.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// First address in the forwarded chain, or [`UNKNOWN_CLIENT`].
pub fn client_identifier(headers: &HeaderMap, header: &HeaderName) -> String {
    headers
        .get(header)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// Span for `TraceLayer` carrying the request ID set by [`set_request_id_layer`].
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}
