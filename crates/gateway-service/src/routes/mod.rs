//! HTTP routes for the gateway.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::errors::GatewayError;
use crate::handlers;
use crate::services::{AccessTokenSigner, RoomServiceClient};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Config,

    /// Access-token signer built from the configured credentials.
    pub signer: AccessTokenSigner,

    /// Provider room-service client.
    pub room_service: RoomServiceClient,
}

impl AppState {
    /// Build application state from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Internal` if the room-service HTTP client
    /// cannot be built.
    pub fn from_config(config: Config) -> Result<Self, crate::errors::GatewayError> {
        let signer = AccessTokenSigner::new(&config.api_key, &config.api_secret);
        let room_service = RoomServiceClient::new(&config)?;
        Ok(Self {
            config,
            signer,
            room_service,
        })
    }
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `POST /token` - Join credential issuance
/// - `GET /rooms` - Advisory room directory
/// - `GET /health` - Liveness probe
/// - Structured 404 body for unknown routes
/// - TraceLayer for request logging
/// - 30 second request timeout
pub fn build_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/token", post(handlers::issue_token))
        .route("/rooms", get(handlers::list_rooms))
        .route("/health", get(handlers::health_check))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}

/// Fallback for unknown routes, so 404s carry the same error body shape as
/// every other gateway error.
async fn not_found() -> GatewayError {
    GatewayError::NotFound("no such endpoint".to_string())
}
