//! Gateway request/response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for `POST /token`.
///
/// Fields are optional at the serde level so a missing field surfaces as a
/// validation error with a helpful message rather than a deserialization
/// rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    /// Room code to join.
    #[serde(default)]
    pub room: Option<String>,

    /// Participant display name.
    #[serde(default)]
    pub username: Option<String>,
}

impl TokenRequest {
    /// Validate that both fields are present and non-blank.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message naming the first missing parameter.
    pub fn validate(&self) -> Result<(), String> {
        if self.room.as_deref().map_or("", str::trim).is_empty() {
            return Err("missing \"room\" parameter".to_string());
        }
        if self.username.as_deref().map_or("", str::trim).is_empty() {
            return Err("missing \"username\" parameter".to_string());
        }
        Ok(())
    }
}

/// Response body for `POST /token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed join credential. Opaque to clients.
    pub token: String,
}

/// Response body for `GET /rooms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomListResponse {
    /// Names of currently active rooms. Advisory only; ordering is not
    /// meaningful and upstream duplicates are passed through.
    pub rooms: Vec<String>,

    /// Server time the list was fetched, so clients can show staleness.
    pub timestamp: DateTime<Utc>,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service health status ("healthy").
    pub status: String,
}
