//! In-memory profile store

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use super::{normalize_email, normalize_phone, CreateParams, Profile, ProfileStore, UpdateParams};
use crate::error::{Error, Result};

/// In-memory [`ProfileStore`] for development and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn create(&self, user_id: &str, params: CreateParams) -> Result<Profile> {
        let mut profiles = self.profiles.write().expect("profiles lock poisoned");

        if profiles.contains_key(user_id) {
            return Err(Error::already_exists("profile"));
        }

        let now = Utc::now();
        let profile = Profile {
            id: user_id.to_string(),
            firstname: params.firstname,
            lastname: params.lastname,
            email: normalize_email(&params.email),
            phone_number: normalize_phone(&params.phone_number),
            marketing: params.marketing,
            terms: params.terms,
            created_at: now,
            updated_at: now,
        };
        profiles.insert(user_id.to_string(), profile.clone());

        Ok(profile)
    }

    async fn get(&self, user_id: &str) -> Result<Profile> {
        let profiles = self.profiles.read().expect("profiles lock poisoned");
        profiles
            .get(user_id)
            .cloned()
            .ok_or_else(|| Error::not_found("profile"))
    }

    async fn update(&self, user_id: &str, params: UpdateParams) -> Result<Profile> {
        let mut profiles = self.profiles.write().expect("profiles lock poisoned");
        let profile = profiles
            .get_mut(user_id)
            .ok_or_else(|| Error::not_found("profile"))?;

        if let Some(firstname) = params.firstname {
            profile.firstname = firstname;
        }
        if let Some(lastname) = params.lastname {
            profile.lastname = lastname;
        }
        if let Some(email) = params.email {
            profile.email = normalize_email(&email);
        }
        if let Some(phone_number) = params.phone_number {
            profile.phone_number = normalize_phone(&phone_number);
        }
        if let Some(marketing) = params.marketing {
            profile.marketing = marketing;
        }
        profile.updated_at = Utc::now();

        Ok(profile.clone())
    }

    async fn delete(&self, user_id: &str) -> Result<()> {
        let mut profiles = self.profiles.write().expect("profiles lock poisoned");
        profiles
            .remove(user_id)
            .map(|_| ())
            .ok_or_else(|| Error::not_found("profile"))
    }
}
