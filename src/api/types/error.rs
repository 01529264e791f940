//! API error types
//!
//! Client-caused failures carry field-level detail; everything else is
//! reduced to a fixed message so no internal state leaks to callers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::token::FieldError;
use crate::domain::DomainError;

/// Wire shape of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: message.into(),
                details: None,
            },
        }
    }

    /// Bad request with a caller-facing message
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Validation failure carrying per-field detail
    pub fn validation_failed(details: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            response: ApiErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(details),
            },
        }
    }

    /// Authorization failure - fixed message, no detail
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    /// Internal failure - fixed message, detail stays server-side
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::Unauthorized { .. } => Self::unauthorized(),
            other => {
                // Conflict, storage and configuration failures are not
                // caller-actionable; log the detail and return the generic
                // message
                tracing::error!(error = %other, "Request failed");
                Self::internal()
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.response.error)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failed_shape() {
        let err = ApiError::validation_failed(vec![FieldError {
            field: "scopes".to_string(),
            message: "scopes must contain at least one scope".to_string(),
        }]);

        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let json = serde_json::to_string(&err.response).unwrap();
        assert!(json.contains("\"error\":\"Validation failed\""));
        assert!(json.contains("\"field\":\"scopes\""));
    }

    #[test]
    fn test_unauthorized_fixed_message() {
        let err = ApiError::unauthorized();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.response.error, "Unauthorized");
        assert!(err.response.details.is_none());
    }

    #[test]
    fn test_details_omitted_when_absent() {
        let err = ApiError::internal();
        let json = serde_json::to_string(&err.response).unwrap();

        assert_eq!(json, r#"{"error":"Internal server error"}"#);
    }

    #[test]
    fn test_domain_error_conversion() {
        let api_err: ApiError = DomainError::validation("bad input").into();
        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);

        let api_err: ApiError = DomainError::unauthorized("wrong key").into();
        assert_eq!(api_err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(api_err.response.error, "Unauthorized");
    }

    #[test]
    fn test_conflict_surfaces_as_internal() {
        let api_err: ApiError = DomainError::conflict("Token value already exists").into();

        assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_err.response.error, "Internal server error");
    }

    #[test]
    fn test_storage_error_not_leaked() {
        let api_err: ApiError =
            DomainError::storage("connection to db.internal:5432 refused").into();

        let json = serde_json::to_string(&api_err.response).unwrap();
        assert!(!json.contains("db.internal"));
        assert_eq!(api_err.response.error, "Internal server error");
    }
}
