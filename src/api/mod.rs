//! HTTP handlers for the public API
//!
//! Each submodule owns one resource. Handlers extract the negotiated
//! response format up front so both success payloads and problem
//! responses honor the request's `Accept` header.

use crate::error::{Error, FieldError, Result};
use validator::Validate;

pub mod health;
pub mod hello;
pub mod items;
pub mod profile;


/// Run derive-based validation and convert failures into a
/// field-level validation error.
pub(crate) fn check_input<T: Validate>(input: &T) -> Result<()> {
    let Err(errors) = input.validate() else {
        return Ok(());
    };

    let mut fields: Vec<FieldError> = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for err in field_errors {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("failed {} validation", err.code));
            fields.push(FieldError {
                field: field.to_string(),
                message,
                value: err
                    .params
                    .get("value")
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            });
        }
    }
    fields.sort_by(|a, b| a.field.cmp(&b.field));

    Err(Error::validation_fields("request validation failed", fields))
}
