//! Health check handler.

use crate::models::HealthResponse;
use axum::Json;
use tracing::instrument;

/// Handler for `GET /health`.
///
/// Liveness probe. The gateway holds no connections or storage of its own,
/// so reachability is the whole story.
#[instrument(name = "gateway.health.check")]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
