//! Liveness endpoint

use crate::respond::{negotiated, Negotiate};
use axum::http::StatusCode;
use axum::response::Response;
use serde::{Deserialize, Serialize};

/// Payload for the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthData {
    /// Always "healthy" while the process serves requests
    pub status: String,
}

/// GET /health
pub async fn get(Negotiate(format): Negotiate) -> Response {
    negotiated(
        format,
        StatusCode::OK,
        &HealthData {
            status: "healthy".to_string(),
        },
    )
}
