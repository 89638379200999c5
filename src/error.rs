// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

/// JSON body returned for every error status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    pub detail: String,

    /// Request ID for tracing
    pub request_id: Option<String>,
}

/// Main application error type.
///
/// AI-pipeline failures (`NoKeysConfigured`, `Upstream`, `ShapeInvalid`) are
/// absorbed by the advisor and converted into local fallback responses; they
/// only reach a handler when something is wired wrong. Caller input errors
/// and truly unexpected failures are the only variants that surface as HTTP
/// error statuses.
#[derive(Error, Debug)]
pub enum AppError {
    // AI pipeline
    #[error("No Gemini API keys configured")]
    NoKeysConfigured,

    #[error("Upstream Gemini call failed: {message}")]
    Upstream { message: String },

    #[error("Upstream response failed shape validation: {message}")]
    ShapeInvalid { message: String },

    // Caller input
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // Configuration and startup
    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("Failed to load hero catalog from '{path}': {message}")]
    CatalogLoad { path: String, message: String },

    // Everything else
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    pub fn shape_invalid(message: impl Into<String>) -> Self {
        Self::ShapeInvalid {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::ConfigParse { .. } => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } | Self::ShapeInvalid { .. } => StatusCode::BAD_GATEWAY,
            Self::NoKeysConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::CatalogLoad { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a human-readable title for the error
    pub fn title(&self) -> &'static str {
        match self {
            Self::NoKeysConfigured => "No API Keys Configured",
            Self::Upstream { .. } => "Upstream Error",
            Self::ShapeInvalid { .. } => "Invalid Upstream Response",
            Self::Validation { .. } => "Validation Error",
            Self::ConfigParse { .. } => "Configuration Error",
            Self::CatalogLoad { .. } => "Catalog Error",
            Self::Internal { .. } => "Internal Server Error",
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self, request_id: &str) {
        if self.status_code().is_server_error() {
            error!(error = %self, request_id = request_id, "Application error occurred");
        } else {
            warn!(error = %self, request_id = request_id, "Client error occurred");
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::Internal {
            message: e.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        Self::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        self.log(&request_id);

        let status = self.status_code();
        let error_response = ErrorResponse {
            title: self.title().to_string(),
            status: status.as_u16(),
            detail: self.to_string(),
            request_id: Some(request_id),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
