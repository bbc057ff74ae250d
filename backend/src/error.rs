//! Error handling for the Krishi dashboard server
//!
//! Provides consistent error responses in English and Hindi. Upstream
//! failures are normally absorbed by the demo fallback in the services, so
//! most of these surface only for bad requests.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_hi: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unsupported commodity: {0}")]
    UnsupportedCommodity(String),

    // External service errors
    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Model output rejected: {0}")]
    ModelOutput(String),

    #[error("Integration not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Validation failure on a named request field
    pub fn invalid(field: &str, message: &str, message_hi: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.to_string(),
            message_hi: message_hi.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        AppError::ExternalService(error.to_string())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_hi: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation {
                field,
                message,
                message_hi,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_hi: message_hi.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_hi: format!("अमान्य डेटा: {}", msg),
                    field: None,
                },
            ),
            AppError::UnsupportedCommodity(name) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "UNSUPPORTED_COMMODITY".to_string(),
                    message_en: format!("No market data for commodity {}", name),
                    message_hi: format!("{} के लिए बाज़ार भाव उपलब्ध नहीं है", name),
                    field: Some("commodity".to_string()),
                },
            ),
            AppError::ExternalService(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "EXTERNAL_SERVICE_ERROR".to_string(),
                    message_en: format!("External service error: {}", msg),
                    message_hi: "बाहरी सेवा में त्रुटि".to_string(),
                    field: None,
                },
            ),
            AppError::ModelOutput(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "MODEL_OUTPUT_ERROR".to_string(),
                    message_en: format!("AI response could not be understood: {}", msg),
                    message_hi: "एआई का उत्तर समझा नहीं जा सका".to_string(),
                    field: None,
                },
            ),
            AppError::NotConfigured(integration) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "NOT_CONFIGURED".to_string(),
                    message_en: format!("{} is not configured", integration),
                    message_hi: format!("{} कॉन्फ़िगर नहीं है", integration),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message_en: format!("Configuration error: {}", msg),
                    message_hi: "सेटिंग में त्रुटि".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_hi: "सर्वर में आंतरिक त्रुटि".to_string(),
                    field: None,
                },
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_internal_error_envelope() {
        let (status, body) = body_of(AppError::Internal("CSV writer error".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert!(body["error"]["message_hi"].is_string());
        assert!(body["error"].get("field").is_none());
    }

    #[tokio::test]
    async fn test_validation_error_names_field() {
        let (status, body) = body_of(AppError::invalid("lat", "bad", "गलत")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["field"], "lat");
        assert_eq!(body["error"]["message_hi"], "गलत");
    }
}
