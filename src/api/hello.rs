//! Greeting endpoints

use crate::respond::{negotiated, problem_for, Negotiate, Problem};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Greeting payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreetingData {
    /// Rendered greeting text
    pub message: String,
}

/// Request body for a personalized greeting.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInput {
    /// Name to greet, 1-100 characters
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// GET /v1/hello
pub async fn get(Negotiate(format): Negotiate) -> Response {
    tracing::info!(path = "/v1/hello", "hello get");
    negotiated(
        format,
        StatusCode::OK,
        &GreetingData {
            message: "Hello, World!".to_string(),
        },
    )
}

/// POST /v1/hello
pub async fn create(
    Negotiate(format): Negotiate,
    body: Result<Json<CreateInput>, JsonRejection>,
) -> Response {
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return Problem::bad_request(rejection.body_text())
                .with_format(format)
                .into_response();
        }
    };
    if let Err(err) = super::check_input(&input) {
        return problem_for(format, err).into_response();
    }

    tracing::info!(path = "/v1/hello", name = %input.name, "hello post");
    negotiated(
        format,
        StatusCode::CREATED,
        &GreetingData {
            message: format!("Hello, {}!", input.name),
        },
    )
}
