//! Error types for the proxy

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for proxy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Proxy errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (missing credential, bad config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-success response from a remote service; the status is forwarded
    #[error("Remote service error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// Remote response had an unexpected shape
    #[error("Processing error: {0}")]
    Processing(String),

    /// Outbound HTTP transport error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a remote-failure error carrying the remote's status code
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// Create a processing error
    pub fn processing(message: impl Into<String>) -> Self {
        Self::Processing(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            Error::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone(), None),
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            Error::Remote { status, message } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                message.clone(),
                None,
            ),
            Error::Processing(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone(), None),
            Error::Http(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Remote request failed".to_string(),
                Some(err.to_string()),
            ),
            Error::Json(err) => (
                StatusCode::BAD_REQUEST,
                "Invalid JSON body".to_string(),
                Some(err.to_string()),
            ),
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "IO error".to_string(),
                Some(err.to_string()),
            ),
            Error::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Some(msg.clone()),
            ),
        };

        let mut body = json!({
            "success": false,
            "error": error,
        });
        if let Some(details) = details {
            body["details"] = json!(details);
        }

        (status, Json(body)).into_response()
    }
}
