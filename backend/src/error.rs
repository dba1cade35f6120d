//! Error handling for the KrishiMitra gateway
//!
//! Every handler error ends up as a JSON `{ "error": ..., "code": ... }` body.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A server-side credential or setting is missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A third-party API failed or answered with a non-success status
    #[error("{service} error: {detail}")]
    Upstream {
        service: &'static str,
        detail: String,
    },

    /// Request body over the configured upload limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Local processing failed (OCR, temporary files)
    #[error("Processing error: {0}")]
    Processing(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn upstream(service: &'static str, detail: impl std::fmt::Display) -> Self {
        AppError::Upstream {
            service,
            detail: detail.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Upstream { .. } => "UPSTREAM_ERROR",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::Processing(_) => "PROCESSING_ERROR",
        }
    }

    /// Message shown to the caller. Upstream details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Configuration(msg) => msg.clone(),
            AppError::Upstream { service, .. } => format!("{} request failed", service),
            AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::Processing(msg) => msg.clone(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        // Body limit hits surface here while the field is streamed
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge("Uploaded file is too large".to_string());
        }
        AppError::Validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {}", self);
        } else {
            tracing::warn!("Error: {}", self);
        }

        let body = ErrorResponse {
            error: self.public_message(),
            code: self.code(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
