//! Error types for the profile API
//!
//! This module defines the error hierarchy for the entire service.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Variants carry a discriminated kind so callers can match on the failure
//! instead of string-comparing messages.

use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name as it appears in the request payload.
    pub field: String,
    /// Human-readable description of the failure.
    pub message: String,
    /// The offending value, stringified.
    pub value: String,
}

/// The main error type for the profile API
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Cursor Errors
    // ============================================================================
    /// Cursor token was not decodable base64/UTF-8 or lacked a separator
    #[error("invalid cursor format")]
    InvalidCursor,

    /// Cursor was minted for a different collection
    #[error("cursor type mismatch: expected '{expected}', got '{actual}'")]
    CursorTypeMismatch {
        /// Cursor kind the endpoint issues
        expected: String,
        /// Kind carried by the presented token
        actual: String,
    },

    /// Cursor points at an id absent from the (filtered) collection
    #[error("cursor references unknown item '{value}'")]
    UnknownCursorItem {
        /// The id the cursor resumed from
        value: String,
    },

    // ============================================================================
    // Request Errors
    // ============================================================================
    /// Request payload failed validation
    #[error("validation failed: {message}")]
    Validation {
        /// Overall failure summary
        message: String,
        /// Per-field failures, possibly empty
        fields: Vec<FieldError>,
    },

    /// Missing or unverifiable credentials
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Reason, safe to surface to the client
        message: String,
    },

    // ============================================================================
    // Store Errors
    // ============================================================================
    /// The addressed resource does not exist
    #[error("{resource} not found")]
    NotFound {
        /// Resource noun, e.g. "profile"
        resource: String,
    },

    /// Create collided with an existing resource
    #[error("{resource} already exists")]
    AlreadyExists {
        /// Resource noun, e.g. "profile"
        resource: String,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Bad or unparsable environment configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong
        message: String,
    },

    // ============================================================================
    // Serialization Errors
    // ============================================================================
    /// JSON encoding failed
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// CBOR encoding failed
    #[error("Failed to encode CBOR: {message}")]
    Cbor {
        /// Encoder diagnostic
        message: String,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// Socket or filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Catch-all with a preformatted message
    #[error("{0}")]
    Other(String),

    /// Wrapped error from an anyhow-based caller
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a validation error without field details
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Create a validation error with field details
    pub fn validation_fields(message: impl Into<String>, fields: Vec<FieldError>) -> Self {
        Self::Validation {
            message: message.into(),
            fields,
        }
    }

    /// Create a not-found error for the named resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an already-exists error for the named resource
    pub fn already_exists(resource: impl Into<String>) -> Self {
        Self::AlreadyExists {
            resource: resource.into(),
        }
    }

    /// Create a cursor type mismatch error
    pub fn cursor_type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::CursorTypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an unknown cursor item error
    pub fn unknown_cursor_item(value: impl Into<String>) -> Self {
        Self::UnknownCursorItem {
            value: value.into(),
        }
    }

    /// Create a CBOR encoding error
    pub fn cbor(message: impl Into<String>) -> Self {
        Self::Cbor {
            message: message.into(),
        }
    }

    /// Whether the error is attributable to the client request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidCursor
                | Error::CursorTypeMismatch { .. }
                | Error::UnknownCursorItem { .. }
                | Error::Validation { .. }
                | Error::Unauthorized { .. }
                | Error::NotFound { .. }
                | Error::AlreadyExists { .. }
        )
    }
}

/// Result type alias for the profile API
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("bad port");
        assert_eq!(err.to_string(), "Configuration error: bad port");

        let err = Error::InvalidCursor;
        assert_eq!(err.to_string(), "invalid cursor format");

        let err = Error::cursor_type_mismatch("item", "profile");
        assert_eq!(
            err.to_string(),
            "cursor type mismatch: expected 'item', got 'profile'"
        );

        let err = Error::not_found("profile");
        assert_eq!(err.to_string(), "profile not found");
    }

    #[test]
    fn test_is_client_error() {
        assert!(Error::InvalidCursor.is_client_error());
        assert!(Error::unknown_cursor_item("x").is_client_error());
        assert!(Error::unauthorized("no token").is_client_error());
        assert!(Error::validation("bad input").is_client_error());
        assert!(Error::already_exists("profile").is_client_error());

        assert!(!Error::config("oops").is_client_error());
        assert!(!Error::Other("boom".to_string()).is_client_error());
    }

    #[test]
    fn test_validation_fields() {
        let err = Error::validation_fields(
            "validation failed",
            vec![FieldError {
                field: "email".to_string(),
                message: "must be a valid email".to_string(),
                value: "nope".to_string(),
            }],
        );
        match err {
            Error::Validation { fields, .. } => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "email");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
