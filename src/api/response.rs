//! Response types for the Attendance Engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidScope { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_SCOPE",
                    message,
                    "The scope is missing a required parameter",
                ),
            },
            EngineError::InvalidMonth { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_MONTH",
                    message,
                    "year/month must name a calendar month (month 1-12)",
                ),
            },
            EngineError::ScopeNotPermitted { .. } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("SCOPE_NOT_PERMITTED", message),
            },
            EngineError::NoUsersResolved { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "NO_USERS_RESOLVED",
                    message,
                    "The scope is valid but covers no users",
                ),
            },
            EngineError::UpstreamFetch { .. } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::new("UPSTREAM_FETCH_FAILED", message),
            },
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_engine_error_status_mapping() {
        let cases = [
            (
                EngineError::InvalidScope {
                    message: "no user ids given".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "INVALID_SCOPE",
            ),
            (
                EngineError::InvalidMonth {
                    year: 2026,
                    month: 13,
                },
                StatusCode::BAD_REQUEST,
                "INVALID_MONTH",
            ),
            (
                EngineError::ScopeNotPermitted {
                    message: "not an admin".to_string(),
                },
                StatusCode::FORBIDDEN,
                "SCOPE_NOT_PERMITTED",
            ),
            (
                EngineError::NoUsersResolved {
                    scope: "all".to_string(),
                },
                StatusCode::NOT_FOUND,
                "NO_USERS_RESOLVED",
            ),
            (
                EngineError::UpstreamFetch {
                    source_name: "shifts".to_string(),
                    message: "timeout".to_string(),
                },
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_FETCH_FAILED",
            ),
            (
                EngineError::ConfigNotFound {
                    path: "seed.json".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
            ),
        ];

        for (engine_error, status, code) in cases {
            let api_error: ApiErrorResponse = engine_error.into();
            assert_eq!(api_error.status, status);
            assert_eq!(api_error.error.code, code);
        }
    }

    #[test]
    fn test_upstream_message_names_the_stream() {
        let api_error: ApiErrorResponse = EngineError::UpstreamFetch {
            source_name: "attendance events".to_string(),
            message: "connection reset".to_string(),
        }
        .into();
        assert_eq!(
            api_error.error.message,
            "Failed to fetch attendance events: connection reset"
        );
    }
}
