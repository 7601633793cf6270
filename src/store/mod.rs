//! Profile persistence boundary
//!
//! The document database behind profiles is an external collaborator:
//! handlers only see the [`ProfileStore`] trait. [`MemoryStore`] backs
//! development and tests.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;


/// A stored user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Owner uid, one profile per user
    pub id: String,
    /// Given name
    pub firstname: String,
    /// Family name
    pub lastname: String,
    /// Contact email, stored lowercased
    pub email: String,
    /// E.164 phone number
    pub phone_number: String,
    /// Marketing consent
    pub marketing: bool,
    /// Terms of service acceptance
    pub terms: bool,
    /// Creation time, UTC
    pub created_at: DateTime<Utc>,
    /// Last modification time, UTC
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a profile.
#[derive(Debug, Clone, Default)]
pub struct CreateParams {
    /// Given name
    pub firstname: String,
    /// Family name
    pub lastname: String,
    /// Contact email, normalized on write
    pub email: String,
    /// E.164 phone number
    pub phone_number: String,
    /// Marketing consent
    pub marketing: bool,
    /// Terms of service acceptance
    pub terms: bool,
}

/// Fields for a partial profile update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateParams {
    /// New given name, if changing
    pub firstname: Option<String>,
    /// New family name, if changing
    pub lastname: Option<String>,
    /// New contact email, normalized on write
    pub email: Option<String>,
    /// New E.164 phone number, if changing
    pub phone_number: Option<String>,
    /// New marketing consent, if changing
    pub marketing: Option<bool>,
}

/// CRUD operations over the profile collection, keyed by user id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Create a profile for the user. Fails with `AlreadyExists` when the
    /// user already has one.
    async fn create(&self, user_id: &str, params: CreateParams) -> Result<Profile>;

    /// Fetch the user's profile. Fails with `NotFound` when absent.
    async fn get(&self, user_id: &str) -> Result<Profile>;

    /// Partially update the user's profile. Fails with `NotFound` when
    /// absent.
    async fn update(&self, user_id: &str, params: UpdateParams) -> Result<Profile>;

    /// Delete the user's profile. Fails with `NotFound` when absent.
    async fn delete(&self, user_id: &str) -> Result<()>;
}

/// Normalize an email address for storage: trimmed and lowercased.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalize a phone number for storage: trimmed.
pub(crate) fn normalize_phone(phone: &str) -> String {
    phone.trim().to_string()
}
