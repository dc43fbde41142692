//! HTTP error handling and response types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::RelayError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message
    pub error: String,
    /// Raw model text, surfaced when generator output could not be parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_output: Option<String>,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            gemini_output: None,
        }
    }

    pub fn with_model_output(mut self, output: impl Into<String>) -> Self {
        self.gemini_output = Some(output.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (validation or decode error)
    BadRequest(String),
    /// A relay operation failed
    Relay(RelayError),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::new(msg)),
            AppError::Relay(RelayError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, ApiError::new(msg))
            }
            AppError::Relay(RelayError::Upstream { service, .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new(service.failure_message()),
            ),
            AppError::Relay(RelayError::MalformedOutput { raw_output, .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("Invalid JSON from generator").with_model_output(raw_output),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, ApiError::new(msg)),
        };

        (status, Json(error)).into_response()
    }
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        AppError::Relay(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::UpstreamService;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::Relay(RelayError::invalid_input("missing")),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Relay(RelayError::upstream(UpstreamService::Store, "down")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Relay(RelayError::MalformedOutput {
                    message: "bad".into(),
                    raw_output: "prose".into(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_api_error_omits_empty_model_output() {
        let body = serde_json::to_value(ApiError::new("nope")).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "nope" }));

        let body = serde_json::to_value(ApiError::new("nope").with_model_output("raw")).unwrap();
        assert_eq!(body["gemini_output"], "raw");
    }
}
