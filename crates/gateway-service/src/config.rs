//! Gateway configuration.
//!
//! Configuration is loaded from environment variables once at startup and
//! injected into the token signer and room-service client. Missing provider
//! credentials are a startup failure, so misconfiguration is detected before
//! any network call is accepted. The API secret is redacted in Debug output.

use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Default HTTP bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default participant token TTL in seconds (15 minutes).
pub const DEFAULT_TOKEN_TTL_SECONDS: u32 = 900;

/// Maximum accepted participant token TTL in seconds (24 hours).
pub const MAX_TOKEN_TTL_SECONDS: u32 = 86_400;

/// Gateway configuration.
///
/// Loaded from environment variables. The provider key/secret/URL are
/// required; everything else has sensible defaults.
#[derive(Clone)]
pub struct Config {
    /// Provider API key (token issuer identity).
    pub api_key: String,

    /// Provider API secret used to sign access tokens.
    pub api_secret: String,

    /// Provider connection URL handed to media clients (e.g. "wss://...").
    pub server_url: String,

    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// Participant token TTL in seconds.
    pub token_ttl_seconds: u32,
}

/// Custom Debug implementation that redacts the API secret.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("server_url", &self.server_url)
            .field("bind_address", &self.bind_address)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid token TTL configuration: {0}")]
    InvalidTokenTtl(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let api_key = required(vars, "LIVEKIT_API_KEY")?;
        let api_secret = required(vars, "LIVEKIT_API_SECRET")?;
        let server_url = required(vars, "LIVEKIT_URL")?;

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        // Parse token TTL with validation
        let token_ttl_seconds = if let Some(value_str) = vars.get("TOKEN_TTL_SECONDS") {
            let value: u32 = value_str.parse().map_err(|e| {
                ConfigError::InvalidTokenTtl(format!(
                    "TOKEN_TTL_SECONDS must be a valid positive integer, got '{}': {}",
                    value_str, e
                ))
            })?;

            if value == 0 {
                return Err(ConfigError::InvalidTokenTtl(
                    "TOKEN_TTL_SECONDS must be greater than 0".to_string(),
                ));
            }

            if value > MAX_TOKEN_TTL_SECONDS {
                return Err(ConfigError::InvalidTokenTtl(format!(
                    "TOKEN_TTL_SECONDS must not exceed {}, got {}",
                    MAX_TOKEN_TTL_SECONDS, value
                )));
            }

            value
        } else {
            DEFAULT_TOKEN_TTL_SECONDS
        };

        Ok(Config {
            api_key,
            api_secret,
            server_url,
            bind_address,
            token_ttl_seconds,
        })
    }
}

fn required(vars: &HashMap<String, String>, name: &str) -> Result<String, ConfigError> {
    match vars.get(name).map(|v| v.trim()) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ConfigError::MissingEnvVar(name.to_string())),
    }
}
