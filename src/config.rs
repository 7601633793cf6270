//! Runtime configuration loaded from the environment
//!
//! All settings have sensible defaults so the server starts with no
//! environment at all. `AUTH_TOKENS` seeds the static token verifier
//! with `token:uid` pairs separated by commas.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::env;

// ============================================================================
// Defaults
// ============================================================================

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ENVIRONMENT: &str = "development";

// ============================================================================
// Config
// ============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port the server binds to
    pub port: u16,

    /// Deployment environment name (e.g. "development", "production")
    pub environment: String,

    /// Bearer token to user id mapping for the static verifier
    pub auth_tokens: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            auth_tokens: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(port) = env::var("PORT") {
            config.port = port
                .parse()
                .map_err(|_| Error::config(format!("invalid PORT value: {port}")))?;
        }

        if let Ok(environment) = env::var("APP_ENVIRONMENT") {
            if !environment.trim().is_empty() {
                config.environment = environment.trim().to_string();
            }
        }

        if let Ok(tokens) = env::var("AUTH_TOKENS") {
            config.auth_tokens = parse_auth_tokens(&tokens)?;
        }

        Ok(config)
    }

    /// True when running in a production environment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Parse a comma-separated list of `token:uid` pairs
fn parse_auth_tokens(raw: &str) -> Result<HashMap<String, String>> {
    let mut tokens = HashMap::new();
    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (token, uid) = entry
            .split_once(':')
            .ok_or_else(|| Error::config(format!("invalid AUTH_TOKENS entry: {entry}")))?;
        if token.is_empty() || uid.is_empty() {
            return Err(Error::config(format!("invalid AUTH_TOKENS entry: {entry}")));
        }
        tokens.insert(token.to_string(), uid.to_string());
    }
    Ok(tokens)
}

// ============================================================================
// Tests
// ============================================================================
