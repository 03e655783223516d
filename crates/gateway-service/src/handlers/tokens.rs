//! Join credential issuance handler.
//!
//! `POST /token` validates the (room, username) pair locally before any
//! signing happens: missing or blank fields are a 400 with a message naming
//! the offending parameter, and the signer is never invoked for them.

use crate::errors::GatewayError;
use crate::models::{TokenRequest, TokenResponse};
use crate::routes::AppState;
use axum::{extract::State, Json};
use common::{DisplayName, RoomCode};
use std::sync::Arc;
use tracing::{info, instrument};

/// Handler for `POST /token`.
///
/// Issues a signed join credential scoped to exactly one (room, username)
/// pair, granting publish and subscribe rights. The room code is normalized
/// (trimmed, uppercased) before signing so "abc123" and "ABC123" land in the
/// same room.
///
/// # Response
///
/// - 200 OK: `{"token": "..."}`
/// - 400 Bad Request: missing/blank field, or signing failure
#[instrument(skip(state, request))]
pub async fn issue_token(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, GatewayError> {
    request.validate().map_err(GatewayError::Validation)?;

    let room = RoomCode::parse(request.room.as_deref().unwrap_or_default())?;
    let username = DisplayName::parse(request.username.as_deref().unwrap_or_default())?;

    let token =
        state
            .signer
            .participant_token(&room, &username, state.config.token_ttl_seconds)?;

    info!(
        target: "gateway.handlers.tokens",
        room = %room,
        "Issued join credential"
    );

    Ok(Json(TokenResponse { token }))
}
