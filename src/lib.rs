// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Profile API
//!
//! A small HTTP service built around two pieces of plumbing:
//!
//! - **Content negotiation**: every endpoint answers in JSON or CBOR
//!   according to the request's `Accept` header (RFC 9110), including
//!   error payloads as RFC 9457 problem details.
//! - **Cursor pagination**: list endpoints page through collections
//!   with opaque base64 cursors and RFC 8288 `Link` headers.
//!
//! On top of that sit a handful of endpoints: a health check, greeting
//! routes, a paginated item catalogue, and bearer-token protected
//! profile CRUD backed by an in-memory store.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use profile_api::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> profile_api::Result<()> {
//!     let config = Config::from_env()?;
//!     let state = server::AppState { /* store, verifier */ };
//!     server::serve(&config, state).await
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the service
pub mod error;

/// Accept header parsing and format selection
pub mod negotiate;

/// Opaque cursors, page slicing, and Link headers
pub mod pagination;

/// Negotiated response writing and problem details
pub mod respond;

/// Cross-cutting HTTP middleware
pub mod middleware;

/// Bearer token verification
pub mod auth;

/// Profile persistence
pub mod store;

/// Request handlers
pub mod api;

/// Environment configuration
pub mod config;

/// Router assembly and server lifecycle
pub mod server;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use negotiate::Format;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
