//! Tests for negotiated responses and Problem Details

use super::*;
use crate::error::FieldError;
use axum::http::header::VARY;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;

async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes()
        .to_vec()
}

// ============================================================================
// negotiated() Tests
// ============================================================================

#[tokio::test]
async fn test_negotiated_json() {
    let response = negotiated(
        Format::Json,
        StatusCode::OK,
        &serde_json::json!({"message": "hi"}),
    );
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let body: serde_json::Value =
        serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["message"], "hi");
}

#[tokio::test]
async fn test_negotiated_cbor() {
    let response = negotiated(
        Format::Cbor,
        StatusCode::OK,
        &serde_json::json!({"message": "hi"}),
    );
    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        "application/cbor"
    );

    let decoded: ciborium::Value =
        ciborium::de::from_reader(body_bytes(response).await.as_slice()).unwrap();
    let map = decoded.into_map().unwrap();
    assert_eq!(map[0].0, ciborium::Value::Text("message".to_string()));
    assert_eq!(map[0].1, ciborium::Value::Text("hi".to_string()));
}

#[tokio::test]
async fn test_negotiated_sets_vary() {
    let response = negotiated(Format::Json, StatusCode::OK, &serde_json::json!({}));
    let vary: Vec<&str> = response
        .headers()
        .get_all(VARY)
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert!(vary.contains(&"Accept"));
    assert!(vary.contains(&"Origin"));
}

// ============================================================================
// ensure_vary Tests
// ============================================================================

#[test]
fn test_ensure_vary_adds_missing() {
    let mut headers = HeaderMap::new();
    ensure_vary(&mut headers, &["Accept", "Origin"]);
    assert_eq!(headers.get_all(VARY).iter().count(), 2);
}

#[test]
fn test_ensure_vary_no_duplicates() {
    let mut headers = HeaderMap::new();
    headers.append(VARY, HeaderValue::from_static("Accept"));
    ensure_vary(&mut headers, &["Accept", "Origin"]);

    let values: Vec<&str> = headers
        .get_all(VARY)
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(values, vec!["Accept", "Origin"]);
}

#[test]
fn test_ensure_vary_merges_comma_separated() {
    let mut headers = HeaderMap::new();
    headers.append(VARY, HeaderValue::from_static("Accept, Accept-Encoding"));
    ensure_vary(&mut headers, &["Accept", "Origin"]);

    let values: Vec<&str> = headers
        .get_all(VARY)
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(values, vec!["Accept, Accept-Encoding", "Origin"]);
}

#[test]
fn test_ensure_vary_case_insensitive() {
    let mut headers = HeaderMap::new();
    headers.append(VARY, HeaderValue::from_static("accept"));
    ensure_vary(&mut headers, &["Accept"]);
    assert_eq!(headers.get_all(VARY).iter().count(), 1);
}

// ============================================================================
// Problem Tests
// ============================================================================

#[test]
fn test_problem_constructors() {
    let problem = Problem::bad_request("invalid cursor format");
    assert_eq!(problem.status, 400);
    assert_eq!(problem.title, "Bad Request");
    assert_eq!(problem.problem_type, "about:blank");
    assert_eq!(problem.detail, "invalid cursor format");

    assert_eq!(Problem::unauthorized("no").status, 401);
    assert_eq!(Problem::not_found("gone").status, 404);
    assert_eq!(Problem::conflict("dup").status, 409);
    assert_eq!(Problem::internal().status, 500);
    assert_eq!(Problem::internal().detail, "internal server error");
}

#[tokio::test]
async fn test_problem_json_body() {
    let response = Problem::not_found("profile not found").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );

    let body: serde_json::Value =
        serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["type"], "about:blank");
    assert_eq!(body["title"], "Not Found");
    assert_eq!(body["status"], 404);
    assert_eq!(body["detail"], "profile not found");
    assert!(body.get("instance").is_none());
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_problem_cbor_content_type() {
    let response = Problem::bad_request("nope")
        .with_format(Format::Cbor)
        .into_response();
    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        "application/problem+cbor"
    );
}

#[tokio::test]
async fn test_problem_field_errors_serialized() {
    let problem = Problem::unprocessable(
        "validation failed",
        vec![ErrorDetail {
            message: "firstname is required".to_string(),
            location: "firstname".to_string(),
            value: String::new(),
        }],
    );
    let response = problem.into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value =
        serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["errors"][0]["message"], "firstname is required");
    assert_eq!(body["errors"][0]["location"], "firstname");
    assert!(body["errors"][0].get("value").is_none());
}

#[test]
fn test_problem_from_error_status_mapping() {
    assert_eq!(Problem::from(Error::InvalidCursor).status, 400);
    assert_eq!(
        Problem::from(Error::cursor_type_mismatch("item", "profile")).status,
        400
    );
    assert_eq!(Problem::from(Error::unknown_cursor_item("z")).status, 400);
    assert_eq!(Problem::from(Error::unauthorized("missing token")).status, 401);
    assert_eq!(Problem::from(Error::not_found("profile")).status, 404);
    assert_eq!(Problem::from(Error::already_exists("profile")).status, 409);
    assert_eq!(Problem::from(Error::validation("bad")).status, 422);

    // Server-side failures never leak details.
    let problem = Problem::from(Error::config("secret path"));
    assert_eq!(problem.status, 500);
    assert_eq!(problem.detail, "internal server error");
}

#[test]
fn test_problem_from_validation_error_carries_fields() {
    let err = Error::validation_fields(
        "validation failed",
        vec![FieldError {
            field: "email".to_string(),
            message: "must be a valid email".to_string(),
            value: "nope".to_string(),
        }],
    );
    let problem = Problem::from(err);
    assert_eq!(problem.errors.len(), 1);
    assert_eq!(problem.errors[0].location, "email");
    assert_eq!(problem.errors[0].value, "nope");
}

#[tokio::test]
async fn test_problem_response_sets_vary() {
    let response = Problem::bad_request("x").into_response();
    let vary: Vec<&str> = response
        .headers()
        .get_all(VARY)
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert!(vary.contains(&"Accept"));
    assert!(vary.contains(&"Origin"));
}
