//! Room directory client for the gateway's `/rooms` endpoint.
//!
//! The room list is advisory: users can always create or join a room by
//! code directly, so directory failures degrade to an empty list instead of
//! blocking the rest of the UI.

use crate::errors::JoinError;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, instrument, warn};

/// Default timeout for gateway requests in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Deserialize)]
struct RoomListBody {
    #[serde(default)]
    rooms: Vec<String>,
}

/// HTTP client for the gateway's room directory.
#[derive(Debug, Clone)]
pub struct RoomDirectoryClient {
    client: Client,
    base_url: String,
}

impl RoomDirectoryClient {
    /// Create a directory client for a gateway base URL.
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
                error!(target: "join.directory", error = %e, "Failed to build HTTP client");
                JoinError::Misconfigured("failed to build HTTP client".to_string())
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the current list of active room codes.
    ///
    /// Ordering is irrelevant and upstream duplicates are passed through;
    /// treat the result as a display hint, not an authoritative registry.
    ///
    /// # Errors
    ///
    /// Returns `JoinError::DirectoryUnavailable` on any transport or
    /// upstream error.
    #[instrument(skip(self))]
    pub async fn list_rooms(&self) -> Result<Vec<String>, JoinError> {
        let url = format!("{}/rooms", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(target: "join.directory", error = %e, "Room list request failed");
            JoinError::DirectoryUnavailable("room directory is unreachable".to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(JoinError::DirectoryUnavailable(format!(
                "room directory returned {status}"
            )));
        }

        let body: RoomListBody = response.json().await.map_err(|e| {
            warn!(target: "join.directory", error = %e, "Failed to parse room list");
            JoinError::DirectoryUnavailable("room directory returned an invalid response".to_string())
        })?;

        Ok(body.rooms)
    }

    /// Fetch the room list, degrading to an empty list on failure.
    ///
    /// This is the call UIs should make on mount: a dead directory must
    /// never block name entry or joining by code.
    pub async fn list_rooms_or_empty(&self) -> Vec<String> {
        match self.list_rooms().await {
            Ok(rooms) => rooms,
            Err(e) => {
                warn!(target: "join.directory", error = %e, "Degrading to empty room list");
                Vec::new()
            }
        }
    }
}
