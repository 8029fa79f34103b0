//! API error type and HTTP mapping.
//!
//! Every handler failure converts to the uniform `{success:false, error}`
//! envelope. Unexpected errors are logged and surfaced as generic 500s.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// API-level error with an HTTP status mapping.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    /// Judge site unreachable or returned garbage.
    Upstream(String),
    /// Anything else; the original error is logged, not leaked verbatim.
    Internal(grindlog_core::Error),
}

impl From<grindlog_core::Error> for ApiError {
    fn from(err: grindlog_core::Error) -> Self {
        use grindlog_core::Error;
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::ProblemNotFound(id) => ApiError::NotFound(format!("Problem not found: {}", id)),
            Error::NoteNotFound(id) => ApiError::NotFound(format!("Note not found: {}", id)),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::UnsupportedPlatform(url) => {
                ApiError::BadRequest(format!("Unsupported platform: {}", url))
            }
            Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            Error::Upstream(msg) => ApiError::Upstream(msg),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Upstream(msg) => {
                tracing::error!(subsystem = "api", error = %msg, "Upstream judge failure");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApiError::Internal(err) => {
                tracing::error!(subsystem = "api", error = %err, "Unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(serde_json::json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_not_found_maps_to_404() {
        let err: ApiError = grindlog_core::Error::ProblemNotFound(Uuid::nil()).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_unsupported_platform_maps_to_bad_request() {
        let err: ApiError =
            grindlog_core::Error::UnsupportedPlatform("https://x.test".to_string()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_upstream_keeps_message() {
        let err: ApiError = grindlog_core::Error::Upstream("cf down".to_string()).into();
        match err {
            ApiError::Upstream(msg) => assert_eq!(msg, "cf down"),
            _ => panic!("Expected Upstream"),
        }
    }

    #[test]
    fn test_storage_error_is_internal() {
        let err: ApiError = grindlog_core::Error::Internal("boom".to_string()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
