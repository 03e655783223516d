//! Gateway error types.
//!
//! All errors map to HTTP status codes via the `IntoResponse` impl. The JSON
//! body carries a flat `error` message plus a stable machine-readable `code`
//! so operators can tell a deployment bug (`MISCONFIGURED`) from a user
//! mistake (`VALIDATION`) without inspecting message text. Provider failures
//! are logged server-side with generic messages returned to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Gateway error type.
///
/// Maps to HTTP status codes:
/// - Validation, Issuance: 400 Bad Request
/// - NotFound: 404 Not Found
/// - DirectoryUnavailable, Misconfigured, Internal: 500 Internal Server Error
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Token issuance failed: {0}")]
    Issuance(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Room directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("Server misconfigured")]
    Misconfigured,

    #[error("Internal server error")]
    Internal,
}

impl GatewayError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::Validation(_) | GatewayError::Issuance(_) => 400,
            GatewayError::NotFound(_) => 404,
            GatewayError::DirectoryUnavailable(_)
            | GatewayError::Misconfigured
            | GatewayError::Internal => 500,
        }
    }
}

/// Flat JSON error body: `{"error": "...", "code": "..."}`.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            GatewayError::Validation(reason) => {
                (StatusCode::BAD_REQUEST, "VALIDATION", reason.clone())
            }
            GatewayError::Issuance(reason) => (StatusCode::BAD_REQUEST, "ISSUANCE", reason.clone()),
            GatewayError::NotFound(resource) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", resource.clone())
            }
            GatewayError::DirectoryUnavailable(reason) => {
                // Log actual reason server-side, return generic message to client
                tracing::warn!(target: "gateway.directory", reason = %reason, "Room directory unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DIRECTORY_UNAVAILABLE",
                    "Unable to fetch room list".to_string(),
                )
            }
            GatewayError::Misconfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "MISCONFIGURED",
                "Server misconfigured".to_string(),
            ),
            GatewayError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                "An internal error occurred".to_string(),
            ),
        };

        let body = ErrorBody {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<common::TypeError> for GatewayError {
    fn from(err: common::TypeError) -> Self {
        GatewayError::Validation(err.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;

    // Helper function to read the response body as JSON
    async fn read_body_json(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_display_validation() {
        let error = GatewayError::Validation("missing \"room\" parameter".to_string());
        assert_eq!(
            format!("{}", error),
            "Validation error: missing \"room\" parameter"
        );
    }

    #[test]
    fn test_display_issuance() {
        let error = GatewayError::Issuance("signing failed".to_string());
        assert_eq!(format!("{}", error), "Token issuance failed: signing failed");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(GatewayError::Validation("x".to_string()).status_code(), 400);
        assert_eq!(GatewayError::Issuance("x".to_string()).status_code(), 400);
        assert_eq!(GatewayError::NotFound("x".to_string()).status_code(), 404);
        assert_eq!(
            GatewayError::DirectoryUnavailable("x".to_string()).status_code(),
            500
        );
        assert_eq!(GatewayError::Misconfigured.status_code(), 500);
        assert_eq!(GatewayError::Internal.status_code(), 500);
    }

    #[tokio::test]
    async fn test_into_response_validation() {
        let error = GatewayError::Validation("missing \"username\" parameter".to_string());
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"], "missing \"username\" parameter");
        assert_eq!(body_json["code"], "VALIDATION");
    }

    #[tokio::test]
    async fn test_into_response_issuance() {
        let error = GatewayError::Issuance("provider rejected grant".to_string());
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"], "provider rejected grant");
        assert_eq!(body_json["code"], "ISSUANCE");
    }

    #[tokio::test]
    async fn test_into_response_directory_unavailable_is_generic() {
        let error = GatewayError::DirectoryUnavailable("connect timeout to provider".to_string());
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // Internal detail stays server-side
        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"], "Unable to fetch room list");
        assert_eq!(body_json["code"], "DIRECTORY_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_into_response_misconfigured_distinct_from_validation() {
        let response = GatewayError::Misconfigured.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"], "Server misconfigured");
        assert_eq!(body_json["code"], "MISCONFIGURED");
    }

    #[tokio::test]
    async fn test_into_response_internal() {
        let response = GatewayError::Internal.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"], "An internal error occurred");
        assert_eq!(body_json["code"], "INTERNAL");
    }

    #[test]
    fn test_from_type_error() {
        let err = common::RoomCode::parse("").unwrap_err();
        let gateway_err: GatewayError = err.into();
        assert!(matches!(gateway_err, GatewayError::Validation(_)));
    }
}
