//! Token client for the gateway's `/token` endpoint.
//!
//! Inputs are validated locally before any request goes out: an empty room
//! or name fails with `JoinError::Validation` and zero network calls. Each
//! successful call issues exactly one outbound request; deduplication is the
//! caller's job (the join state machine allows at most one in-flight
//! request).

use crate::errors::JoinError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{error, instrument, warn};

/// Default timeout for gateway requests in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Opaque signed join credential.
///
/// Scoped to one (room, name) pair by the issuer; expiry is the issuer's
/// concern and not tracked here. Held in memory only, never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct JoinCredential(String);

impl JoinCredential {
    /// The raw token string, for handing to the media transport.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for JoinCredential {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Credentials are redacted in Debug output.
impl fmt::Debug for JoinCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JoinCredential([REDACTED])")
    }
}

/// Capability to obtain a join credential for a (room, name) pair.
///
/// Implemented by `TokenClient` against the real gateway and by mocks in
/// tests.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Request a join credential.
    ///
    /// # Errors
    ///
    /// - `JoinError::Validation` if either input is empty (no network call)
    /// - `JoinError::Issuance` on transport failure or service rejection
    async fn request_token(&self, room: &str, name: &str) -> Result<JoinCredential, JoinError>;
}

#[derive(Serialize)]
struct TokenRequestBody<'a> {
    room: &'a str,
    username: &'a str,
}

#[derive(Deserialize)]
struct TokenResponseBody {
    #[serde(default)]
    token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the gateway's token endpoint.
#[derive(Debug, Clone)]
pub struct TokenClient {
    client: Client,
    base_url: String,
}

impl TokenClient {
    /// Create a token client for a gateway base URL.
    ///
    /// # Errors
    ///
    /// Returns `JoinError::Misconfigured` if the HTTP client cannot be
    /// built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, JoinError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                error!(target: "join.token_client", error = %e, "Failed to build HTTP client");
                JoinError::Misconfigured("failed to build HTTP client".to_string())
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TokenIssuer for TokenClient {
    #[instrument(skip(self, name), fields(room = %room))]
    async fn request_token(&self, room: &str, name: &str) -> Result<JoinCredential, JoinError> {
        let room = room.trim();
        let name = name.trim();

        // Local validation; the network is never touched for empty inputs.
        if room.is_empty() {
            return Err(JoinError::Validation("room must not be empty".to_string()));
        }
        if name.is_empty() {
            return Err(JoinError::Validation("name must not be empty".to_string()));
        }

        let url = format!("{}/token", self.base_url);
        let body = TokenRequestBody {
            room,
            username: name,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(target: "join.token_client", error = %e, "Token request failed");
                JoinError::Issuance("token service is unreachable".to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the upstream message when the body carries one.
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("token service returned {status}"));
            return Err(JoinError::Issuance(message));
        }

        let body: TokenResponseBody = response.json().await.map_err(|e| {
            warn!(target: "join.token_client", error = %e, "Failed to parse token response");
            JoinError::Issuance("token service returned an invalid response".to_string())
        })?;

        if body.token.is_empty() {
            return Err(JoinError::Issuance(
                "token service returned an empty token".to_string(),
            ));
        }

        Ok(JoinCredential::from(body.token))
    }
}
