//! Provider room-service client.
//!
//! Fetches the list of active rooms from the hosted media provider's Twirp
//! API. Room listing is advisory: failures map to
//! `GatewayError::DirectoryUnavailable` and are logged server-side with a
//! generic message returned to clients.

use crate::config::Config;
use crate::errors::GatewayError;
use crate::services::access_token::AccessTokenSigner;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, instrument, warn};

/// Default timeout for provider requests in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// A single room entry in the provider's list response. Fields beyond the
/// name are ignored; the name is the join code.
#[derive(Debug, Clone, Deserialize)]
struct RoomInfo {
    name: String,
}

/// Provider response for the list-rooms call. Twirp omits empty arrays.
#[derive(Debug, Clone, Deserialize)]
struct ListRoomsResponse {
    #[serde(default)]
    rooms: Vec<RoomInfo>,
}

/// HTTP client for the provider's room service.
#[derive(Debug, Clone)]
pub struct RoomServiceClient {
    /// HTTP client with configured timeouts.
    client: Client,

    /// Provider API base URL (ws schemes converted to http).
    http_url: String,

    /// Signer for room-list tokens.
    signer: AccessTokenSigner,
}

impl RoomServiceClient {
    /// Create a room-service client from gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Internal` if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| {
                error!(target: "gateway.services.room_service", error = %e, "Failed to build HTTP client");
                GatewayError::Internal
            })?;

        Ok(Self {
            client,
            http_url: to_http_url(&config.server_url),
            signer: AccessTokenSigner::new(&config.api_key, &config.api_secret),
        })
    }

    /// Fetch the names of currently active rooms.
    ///
    /// Ordering is not meaningful and upstream duplicates are passed
    /// through; callers treat the list as a display hint.
    ///
    /// # Errors
    ///
    /// - `GatewayError::DirectoryUnavailable` if the provider is unreachable
    ///   or returns a non-success status
    /// - `GatewayError::Internal` if the response cannot be parsed
    #[instrument(skip(self))]
    pub async fn list_rooms(&self) -> Result<Vec<String>, GatewayError> {
        let token = self.signer.room_list_token()?;
        let url = format!("{}/twirp/livekit.RoomService/ListRooms", self.http_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| {
                warn!(target: "gateway.services.room_service", error = %e, "Room service request failed");
                GatewayError::DirectoryUnavailable("room service is unreachable".to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(target: "gateway.services.room_service", status = %status, "Room service returned error status");
            return Err(GatewayError::DirectoryUnavailable(format!(
                "room service returned {status}"
            )));
        }

        let body: ListRoomsResponse = response.json().await.map_err(|e| {
            error!(target: "gateway.services.room_service", error = %e, "Failed to parse room service response");
            GatewayError::Internal
        })?;

        Ok(body.rooms.into_iter().map(|room| room.name).collect())
    }
}

/// Convert a media connection URL to the HTTP base for API calls.
///
/// The provider hands clients a WebSocket URL; the same host serves the
/// Twirp API over HTTP(S).
fn to_http_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    if let Some(rest) = trimmed.strip_prefix("wss://") {
        format!("https://{rest}")
    } else if let Some(rest) = trimmed.strip_prefix("ws://") {
        format!("http://{rest}")
    } else {
        trimmed.to_string()
    }
}
