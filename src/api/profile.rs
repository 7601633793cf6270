//! Profile CRUD for the authenticated user
//!
//! All routes in this module sit behind the bearer auth middleware,
//! which guarantees an [`AuthUser`] extension on the request.

use crate::auth::AuthUser;
use crate::error::{Error, Result};
use crate::respond::{negotiated, problem_for, Negotiate, Problem};
use crate::server::AppState;
use crate::store::{CreateParams, Profile, UpdateParams};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use validator::Validate;

static PHONE_E164: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").expect("valid E.164 pattern"));

// ============================================================================
// Inputs
// ============================================================================

/// Request body for POST /v1/profile.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInput {
    /// Given name, 1-100 characters
    #[validate(length(min = 1, max = 100))]
    pub firstname: String,

    /// Family name, 1-100 characters
    #[validate(length(min = 1, max = 100))]
    pub lastname: String,

    /// Contact email
    #[validate(email)]
    pub email: String,

    /// Phone number in E.164 form
    #[validate(regex(path = *PHONE_E164, message = "must be an E.164 phone number"))]
    pub phone_number: String,

    /// Marketing consent, defaults to false
    #[serde(default)]
    pub marketing: bool,

    /// Terms acceptance, must be true to create
    #[serde(default)]
    pub terms: bool,
}

/// Request body for PATCH /v1/profile. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInput {
    /// New given name
    #[validate(length(min = 1, max = 100))]
    pub firstname: Option<String>,

    /// New family name
    #[validate(length(min = 1, max = 100))]
    pub lastname: Option<String>,

    /// New contact email
    #[validate(email)]
    pub email: Option<String>,

    /// New phone number in E.164 form
    #[validate(regex(path = *PHONE_E164, message = "must be an E.164 phone number"))]
    pub phone_number: Option<String>,

    /// New marketing consent
    pub marketing: Option<bool>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/profile
pub async fn create(
    Negotiate(format): Negotiate,
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: std::result::Result<Json<CreateInput>, JsonRejection>,
) -> Response {
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return Problem::bad_request(rejection.body_text())
                .with_format(format)
                .into_response();
        }
    };

    match create_profile(&state, &user, input).await {
        Ok(profile) => {
            let mut response = negotiated(format, StatusCode::CREATED, &profile);
            if let Ok(value) = "/v1/profile".parse() {
                response.headers_mut().insert(header::LOCATION, value);
            }
            response
        }
        Err(err) => problem_for(format, err).into_response(),
    }
}

async fn create_profile(
    state: &AppState,
    user: &AuthUser,
    input: CreateInput,
) -> Result<Profile> {
    super::check_input(&input)?;
    if !input.terms {
        return Err(Error::validation("terms must be accepted"));
    }

    state
        .store
        .create(
            &user.uid,
            CreateParams {
                firstname: input.firstname,
                lastname: input.lastname,
                email: input.email,
                phone_number: input.phone_number,
                marketing: input.marketing,
                terms: input.terms,
            },
        )
        .await
}

/// GET /v1/profile
pub async fn get(
    Negotiate(format): Negotiate,
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    match state.store.get(&user.uid).await {
        Ok(profile) => negotiated(format, StatusCode::OK, &profile),
        Err(err) => problem_for(format, err).into_response(),
    }
}

/// PATCH /v1/profile
pub async fn update(
    Negotiate(format): Negotiate,
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: std::result::Result<Json<UpdateInput>, JsonRejection>,
) -> Response {
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return Problem::bad_request(rejection.body_text())
                .with_format(format)
                .into_response();
        }
    };

    match update_profile(&state, &user, input).await {
        Ok(profile) => negotiated(format, StatusCode::OK, &profile),
        Err(err) => problem_for(format, err).into_response(),
    }
}

async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    input: UpdateInput,
) -> Result<Profile> {
    super::check_input(&input)?;

    state
        .store
        .update(
            &user.uid,
            UpdateParams {
                firstname: input.firstname,
                lastname: input.lastname,
                email: input.email,
                phone_number: input.phone_number,
                marketing: input.marketing,
            },
        )
        .await
}

/// DELETE /v1/profile
pub async fn delete(
    Negotiate(format): Negotiate,
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    match state.store.delete(&user.uid).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => problem_for(format, err).into_response(),
    }
}
