//! HTTP middleware
//!
//! Response-shaping layers applied to every route: `Vary` bookkeeping for
//! content negotiation, OWASP security headers, request ID propagation, and
//! permissive CORS defaults suitable for a public API.

use axum::extract::Request;
use axum::http::header::{HeaderName, HeaderValue};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use crate::respond::ensure_vary;

#[cfg(test)]
mod tests;

/// Canonical request ID header name.
pub const HEADER_X_REQUEST_ID: &str = "x-request-id";

/// Limits request ID size to prevent unbounded memory usage.
const MAX_REQUEST_ID_LENGTH: usize = 128;

/// Request ID attached to request extensions by [`request_id`].
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

// ============================================================================
// Vary
// ============================================================================

/// Add `Accept` to the `Vary` header on all responses.
///
/// Per RFC 9110 Section 12.5.5 the `Vary` header lists request headers that
/// influence response selection; this API negotiates JSON or CBOR from
/// `Accept` on every endpoint.
pub async fn vary(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    ensure_vary(response.headers_mut(), &["Accept"]);
    response
}

// ============================================================================
// Security Headers
// ============================================================================

/// Set security headers on all responses.
///
/// Headers follow the OWASP REST Security Cheat Sheet recommendations.
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    let set = |headers: &mut axum::http::HeaderMap, name: &'static str, value: &'static str| {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    };

    set(headers, "cache-control", "no-store");
    set(headers, "content-security-policy", "frame-ancestors 'none'");
    set(headers, "cross-origin-opener-policy", "same-origin");
    set(headers, "cross-origin-resource-policy", "same-origin");
    set(
        headers,
        "permissions-policy",
        "accelerometer=(), camera=(), geolocation=(), gyroscope=(), magnetometer=(), microphone=(), payment=(), usb=()",
    );
    set(headers, "referrer-policy", "strict-origin-when-cross-origin");
    set(headers, "x-content-type-options", "nosniff");
    set(headers, "x-frame-options", "DENY");

    response
}

// ============================================================================
// Request ID
// ============================================================================

/// Validate a request ID for safe logging.
///
/// Only printable ASCII (0x20-0x7E) is accepted, excluding control
/// characters and newlines that could enable log injection.
fn is_valid_request_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_REQUEST_ID_LENGTH
        && id.bytes().all(|b| (0x20..=0x7e).contains(&b))
}

/// Inject a UUIDv4 request identifier.
///
/// A valid incoming `X-Request-ID` header is reused; invalid ones (too long,
/// empty, non-printable) are replaced with a fresh UUID. The identifier is
/// exposed to handlers as a [`RequestId`] extension and echoed on the
/// response.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let incoming = request
        .headers()
        .get(HEADER_X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let id = if is_valid_request_id(incoming) {
        incoming.to_string()
    } else {
        Uuid::new_v4().to_string()
    };

    request.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(HEADER_X_REQUEST_ID), value);
    }
    response
}

// ============================================================================
// CORS
// ============================================================================

/// Permissive CORS defaults suitable for APIs.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("accept"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("content-type"),
            HeaderName::from_static("x-csrf-token"),
            HeaderName::from_static("x-request-id"),
            HeaderName::from_static("traceparent"),
        ])
        .expose_headers([
            HeaderName::from_static("link"),
            HeaderName::from_static("location"),
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(std::time::Duration::from_secs(300))
}
