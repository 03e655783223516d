//! Provider-compatible access-token signing.
//!
//! The hosted media provider accepts HS256 JWTs signed with the API secret,
//! carrying a `video` grant claim with camelCase fields. A participant token
//! is scoped to exactly one (room, identity) pair and grants publish and
//! subscribe rights; a room-list token carries only the `roomList` grant and
//! is used by the room-service client for directory reads.

use crate::errors::GatewayError;
use chrono::Utc;
use common::{DisplayName, RoomCode};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

/// Leeway applied to `nbf` so freshly issued tokens survive small clock skew.
const NBF_LEEWAY_SECONDS: i64 = 10;

/// TTL for internally used room-list tokens, in seconds.
const ROOM_LIST_TOKEN_TTL_SECONDS: i64 = 60;

/// Video grant claim, serialized with the provider's camelCase field names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoGrant {
    /// Room the grant is scoped to (absent for admin grants).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,

    /// Whether the holder may join the room.
    pub room_join: bool,

    /// Whether the holder may publish media.
    pub can_publish: bool,

    /// Whether the holder may subscribe to media.
    pub can_subscribe: bool,

    /// Whether the holder may list active rooms.
    pub room_list: bool,
}

/// JWT claims accepted by the provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Issuer: the API key.
    pub iss: String,

    /// Subject: the participant identity.
    pub sub: String,

    /// Human-readable participant name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Not-before, seconds since epoch.
    pub nbf: i64,

    /// Expiry, seconds since epoch.
    pub exp: i64,

    /// The video grant.
    pub video: VideoGrant,
}

/// Signs provider-compatible access tokens with the configured API secret.
#[derive(Clone)]
pub struct AccessTokenSigner {
    api_key: String,
    api_secret: String,
}

impl fmt::Debug for AccessTokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessTokenSigner")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

impl AccessTokenSigner {
    /// Create a signer from provider credentials.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Sign a participant token for one (room, identity) pair.
    ///
    /// The token grants join, publish and subscribe for that room only.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Issuance` if signing fails.
    pub fn participant_token(
        &self,
        room: &RoomCode,
        identity: &DisplayName,
        ttl_seconds: u32,
    ) -> Result<String, GatewayError> {
        let grant = VideoGrant {
            room: Some(room.as_str().to_string()),
            room_join: true,
            can_publish: true,
            can_subscribe: true,
            room_list: false,
        };
        self.sign(
            identity.as_str(),
            Some(identity.as_str()),
            grant,
            i64::from(ttl_seconds),
        )
    }

    /// Sign a short-lived token carrying only the room-list grant.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Issuance` if signing fails.
    pub fn room_list_token(&self) -> Result<String, GatewayError> {
        let grant = VideoGrant {
            room_list: true,
            ..VideoGrant::default()
        };
        let sub = self.api_key.clone();
        self.sign(&sub, None, grant, ROOM_LIST_TOKEN_TTL_SECONDS)
    }

    fn sign(
        &self,
        sub: &str,
        name: Option<&str>,
        video: VideoGrant,
        ttl_seconds: i64,
    ) -> Result<String, GatewayError> {
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            iss: self.api_key.clone(),
            sub: sub.to_string(),
            name: name.map(ToString::to_string),
            nbf: now - NBF_LEEWAY_SECONDS,
            exp: now + ttl_seconds,
            video,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.api_secret.as_bytes()),
        )
        .map_err(|e| {
            error!(target: "gateway.services.access_token", error = %e, "Failed to sign access token");
            GatewayError::Issuance("failed to sign access token".to_string())
        })
    }
}
