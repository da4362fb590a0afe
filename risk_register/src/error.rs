//! Errors returned by the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::risk::ValidationError;

/// Errors surfaced to API clients as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body could not be parsed as a risk.
    #[error("{0}")]
    MalformedBody(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Risk not found")]
    RiskNotFound,

    /// A handler panicked while serving the request.
    #[error("Internal server error")]
    Internal,
}

/// Error body format.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::RiskNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::MalformedBody(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Validation(ValidationError::MissingFields { fields }) = &self {
            debug!(?fields, "Rejected risk with missing fields");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::MalformedBody("eof".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ValidationError::InvalidState("x".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::RiskNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_match_wire_format() {
        let missing = ApiError::from(ValidationError::MissingFields {
            fields: vec!["title"],
        });
        assert_eq!(missing.to_string(), "Missing required risk fields");
        assert_eq!(ApiError::RiskNotFound.to_string(), "Risk not found");
    }

    #[test]
    fn test_parse_errors_become_malformed_body() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, ApiError::MalformedBody(ref msg) if !msg.is_empty()));
    }
}
