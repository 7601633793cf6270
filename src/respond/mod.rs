//! Negotiated response writing and RFC 9457 Problem Details
//!
//! Success payloads and problem payloads are both serialized in whichever
//! format the request's `Accept` header won: JSON by default, CBOR when it
//! strictly dominates. Problem bodies use the corresponding
//! `application/problem+json` / `application/problem+cbor` content type.
//! Every response whose body depended on `Accept` advertises it (plus
//! `Origin`, which CORS varies on) in the `Vary` header.

use axum::extract::FromRequestParts;
use axum::http::header::{ACCEPT, CONTENT_TYPE, VARY};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::Error;
use crate::negotiate::Format;

#[cfg(test)]
mod tests;

// ============================================================================
// Negotiate Extractor
// ============================================================================

/// Axum extractor capturing the request's negotiated response format.
///
/// Infallible: an absent or unparseable `Accept` header resolves to JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct Negotiate(pub Format);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Negotiate
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(format_from_headers(&parts.headers)))
    }
}

/// Resolve the response format from a request header map.
pub fn format_from_headers(headers: &HeaderMap) -> Format {
    let accept = headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    Format::from_accept(accept)
}

// ============================================================================
// Response Writing
// ============================================================================

/// Write `data` as a negotiated response body with the given status.
pub fn negotiated<T: Serialize>(format: Format, status: StatusCode, data: &T) -> Response {
    let body = match encode(format, data) {
        Ok(body) => body,
        Err(err) => {
            tracing::error!(error = %err, "response serialization failed");
            return Problem::internal().with_format(format).into_response();
        }
    };

    let mut response = (
        status,
        [(CONTENT_TYPE, format.content_type())],
        body,
    )
        .into_response();
    ensure_vary(response.headers_mut(), &["Accept", "Origin"]);
    response
}

fn encode<T: Serialize>(format: Format, data: &T) -> crate::Result<Vec<u8>> {
    match format {
        Format::Json => Ok(serde_json::to_vec(data)?),
        Format::Cbor => {
            let mut buf = Vec::new();
            ciborium::ser::into_writer(data, &mut buf)
                .map_err(|e| Error::cbor(e.to_string()))?;
            Ok(buf)
        }
    }
}

/// Add values to the `Vary` header without duplicating existing tokens.
pub fn ensure_vary(headers: &mut HeaderMap, values: &[&str]) {
    let existing: Vec<String> = headers
        .get_all(VARY)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|v| v.trim().to_ascii_lowercase())
        .collect();

    for value in values {
        if existing.contains(&value.to_ascii_lowercase()) {
            continue;
        }
        if let Ok(header_value) = HeaderValue::from_str(value) {
            headers.append(VARY, header_value);
        }
    }
}

// ============================================================================
// Problem Details
// ============================================================================

/// RFC 9457 Problem Details payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Problem {
    /// Problem type URI, "about:blank" unless specialised
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short human-readable summary matching the status phrase
    pub title: String,
    /// HTTP status code duplicated in the body
    pub status: u16,
    /// Occurrence-specific explanation
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail: String,
    /// URI of the specific occurrence, when known
    #[serde(skip_serializing_if = "String::is_empty")]
    pub instance: String,
    /// Field-level failures for 422 responses
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorDetail>,
    #[serde(skip)]
    format: Format,
}

/// A single field-level error within a Problem Details response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorDetail {
    /// What failed
    pub message: String,
    /// Offending field name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,
    /// Offending value, stringified
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
}

impl Problem {
    /// Create a problem with the given status code and detail message.
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            problem_type: "about:blank".to_string(),
            title: status.canonical_reason().unwrap_or("").to_string(),
            status: status.as_u16(),
            detail: detail.into(),
            instance: String::new(),
            errors: Vec::new(),
            format: Format::Json,
        }
    }

    /// 400 Bad Request
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    /// 401 Unauthorized
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, detail)
    }

    /// 404 Not Found
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    /// 409 Conflict
    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, detail)
    }

    /// 422 Unprocessable Entity with field-level errors
    pub fn unprocessable(detail: impl Into<String>, errors: Vec<ErrorDetail>) -> Self {
        let mut problem = Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail);
        problem.errors = errors;
        problem
    }

    /// 500 Internal Server Error with an opaque detail
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }

    /// Set the serialization format for the problem body.
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Set the `instance` URI reference.
    #[must_use]
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = instance.into();
        self
    }
}

/// Convert a service error into a problem rendered in the request's format.
pub fn problem_for(format: Format, err: Error) -> Problem {
    Problem::from(err).with_format(format)
}

impl From<Error> for Problem {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidCursor
            | Error::CursorTypeMismatch { .. }
            | Error::UnknownCursorItem { .. } => Self::bad_request(err.to_string()),
            Error::Validation { message, fields } => Self::unprocessable(
                message,
                fields
                    .into_iter()
                    .map(|f| ErrorDetail {
                        message: f.message,
                        location: f.field,
                        value: f.value,
                    })
                    .collect(),
            ),
            Error::Unauthorized { message } => Self::unauthorized(message),
            Error::NotFound { .. } => Self::not_found(err.to_string()),
            Error::AlreadyExists { .. } => Self::conflict(err.to_string()),
            other => {
                tracing::error!(error = %other, "request failed");
                Self::internal()
            }
        }
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = self.format.problem_content_type();

        let body = match encode(self.format, &self) {
            Ok(body) => body,
            // Fall back to a bare status rather than recursing.
            Err(_) => {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        let mut response = (status, [(CONTENT_TYPE, content_type)], body).into_response();
        ensure_vary(response.headers_mut(), &["Accept", "Origin"]);
        response
    }
}
