//! Tests for HTTP middleware

use super::*;
use axum::body::Body;
use axum::http::header::VARY;
use axum::http::{Request as HttpRequest, StatusCode};
use axum::routing::get;
use axum::Router;
use tower::ServiceExt;

fn test_router() -> Router {
    Router::new().route("/", get(|| async { "ok" }))
}

async fn send(router: Router, request: HttpRequest<Body>) -> axum::response::Response {
    router.oneshot(request).await.unwrap()
}

// ============================================================================
// Vary Tests
// ============================================================================

#[tokio::test]
async fn test_vary_adds_accept() {
    let app = test_router().layer(axum::middleware::from_fn(vary));
    let response = send(app, HttpRequest::get("/").body(Body::empty()).unwrap()).await;

    let vary: Vec<&str> = response
        .headers()
        .get_all(VARY)
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert!(vary.contains(&"Accept"));
}

#[tokio::test]
async fn test_vary_does_not_duplicate() {
    let app = Router::new()
        .route(
            "/",
            get(|| async {
                ([(VARY, "Accept")], "ok")
            }),
        )
        .layer(axum::middleware::from_fn(vary));
    let response = send(app, HttpRequest::get("/").body(Body::empty()).unwrap()).await;

    let count = response
        .headers()
        .get_all(VARY)
        .iter()
        .filter(|v| v.to_str().unwrap().contains("Accept"))
        .count();
    assert_eq!(count, 1);
}

// ============================================================================
// Security Header Tests
// ============================================================================

#[tokio::test]
async fn test_security_headers_present() {
    let app = test_router().layer(axum::middleware::from_fn(security_headers));
    let response = send(app, HttpRequest::get("/").body(Body::empty()).unwrap()).await;
    let headers = response.headers();

    assert_eq!(headers.get("cache-control").unwrap(), "no-store");
    assert_eq!(
        headers.get("content-security-policy").unwrap(),
        "frame-ancestors 'none'"
    );
    assert_eq!(headers.get("cross-origin-opener-policy").unwrap(), "same-origin");
    assert_eq!(headers.get("cross-origin-resource-policy").unwrap(), "same-origin");
    assert_eq!(
        headers.get("referrer-policy").unwrap(),
        "strict-origin-when-cross-origin"
    );
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers.contains_key("permissions-policy"));
}

// ============================================================================
// Request ID Tests
// ============================================================================

#[test]
fn test_is_valid_request_id() {
    assert!(is_valid_request_id("abc-123"));
    assert!(is_valid_request_id(&"x".repeat(128)));

    assert!(!is_valid_request_id(""));
    assert!(!is_valid_request_id(&"x".repeat(129)));
    assert!(!is_valid_request_id("line\nbreak"));
    assert!(!is_valid_request_id("null\0byte"));
    assert!(!is_valid_request_id("日本語"));
}

#[tokio::test]
async fn test_request_id_generated() {
    let app = test_router().layer(axum::middleware::from_fn(request_id));
    let response = send(app, HttpRequest::get("/").body(Body::empty()).unwrap()).await;

    let id = response
        .headers()
        .get(HEADER_X_REQUEST_ID)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(Uuid::parse_str(id).is_ok(), "expected a UUID, got {id}");
}

#[tokio::test]
async fn test_request_id_reuses_valid_incoming() {
    let app = test_router().layer(axum::middleware::from_fn(request_id));
    let request = HttpRequest::get("/")
        .header(HEADER_X_REQUEST_ID, "client-supplied-id")
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await;

    assert_eq!(
        response.headers().get(HEADER_X_REQUEST_ID).unwrap(),
        "client-supplied-id"
    );
}

#[tokio::test]
async fn test_request_id_replaces_invalid_incoming() {
    let app = test_router().layer(axum::middleware::from_fn(request_id));
    let request = HttpRequest::get("/")
        .header(HEADER_X_REQUEST_ID, "x".repeat(200))
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await;

    let id = response
        .headers()
        .get(HEADER_X_REQUEST_ID)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(Uuid::parse_str(id).is_ok(), "expected a fresh UUID, got {id}");
}

#[tokio::test]
async fn test_request_id_available_as_extension() {
    use axum::Extension;

    let app = Router::new()
        .route(
            "/",
            get(|Extension(id): Extension<RequestId>| async move { id.0 }),
        )
        .layer(axum::middleware::from_fn(request_id));
    let request = HttpRequest::get("/")
        .header(HEADER_X_REQUEST_ID, "trace-me")
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    use http_body_util::BodyExt;
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"trace-me");
}
