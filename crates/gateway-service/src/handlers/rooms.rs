//! Room directory handler.

use crate::errors::GatewayError;
use crate::models::RoomListResponse;
use crate::routes::AppState;
use axum::{
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;

/// Handler for `GET /rooms`.
///
/// Returns the advisory list of active room names from the provider,
/// stamped with the fetch time. Responses carry `Cache-Control: no-store`
/// so clients always see a fresh list.
///
/// # Response
///
/// - 200 OK: `{"rooms": [...], "timestamp": "..."}`
/// - 500 Internal Server Error: provider unreachable (`DIRECTORY_UNAVAILABLE`)
#[instrument(skip(state))]
pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, GatewayError> {
    let rooms = state.room_service.list_rooms().await?;

    let response = RoomListResponse {
        rooms,
        timestamp: Utc::now(),
    };

    Ok((
        AppendHeaders([(header::CACHE_CONTROL, "no-store, must-revalidate")]),
        Json(response),
    ))
}
