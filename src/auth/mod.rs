//! Bearer token authentication
//!
//! Token verification is a boundary: the [`Verifier`] trait is injected into
//! the router so the HTTP layer never knows which identity provider backs
//! it. [`StaticTokenVerifier`] serves development and tests; a production
//! deployment plugs in its own implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::{Error, Result};
use crate::respond::{format_from_headers, Problem};


/// Authenticated principal attached to the request after verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Stable user identifier issued by the identity provider.
    pub uid: String,
    /// Verified email address, when the provider supplies one.
    pub email: Option<String>,
}

/// Verifies bearer tokens into authenticated users.
#[async_trait]
pub trait Verifier: Send + Sync {
    /// Verify a raw bearer token, returning the authenticated user.
    async fn verify(&self, token: &str) -> Result<AuthUser>;
}

/// Token verifier backed by a fixed token-to-user map.
#[derive(Debug, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, AuthUser>,
}

impl StaticTokenVerifier {
    /// Create an empty verifier that rejects every token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token for the given user id.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, uid: impl Into<String>) -> Self {
        self.tokens.insert(
            token.into(),
            AuthUser {
                uid: uid.into(),
                email: None,
            },
        );
        self
    }
}

#[async_trait]
impl Verifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthUser> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| Error::unauthorized("invalid token"))
    }
}

/// Extract the bearer token from an `Authorization` header value.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Middleware requiring a valid bearer token.
///
/// On success the [`AuthUser`] is inserted into request extensions; on
/// failure a negotiated 401 problem is returned.
pub async fn require_auth(
    State(verifier): State<Arc<dyn Verifier>>,
    mut request: Request,
    next: Next,
) -> Response {
    let format = format_from_headers(request.headers());

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);

    let Some(token) = token else {
        return Problem::unauthorized("missing bearer token")
            .with_format(format)
            .into_response();
    };

    match verifier.verify(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            tracing::debug!(error = %err, "token verification failed");
            Problem::unauthorized("invalid token")
                .with_format(format)
                .into_response()
        }
    }
}
