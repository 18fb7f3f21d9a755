//! Error handling for the RSVP backend
//!
//! This module defines the main error types used throughout the application
//! and how each of them is rendered as an HTTP response.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};

/// Main error type for the RSVP backend
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Order API error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing, malformed, expired or unverifiable bearer token
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated caller lacks a required role
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated caller does not own the record
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Order API (FastSpring) specific errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Order API request failed: {0}")]
    RequestFailed(String),

    #[error("Order API timeout")]
    Timeout,

    #[error("Invalid order API response: {0}")]
    InvalidResponse(String),

    #[error("Order API unavailable")]
    ServiceUnavailable,
}

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// HTTP status code returned to the client.
    ///
    /// The web client expects not-found as 400 and both role and ownership
    /// violations as 401.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Gateway(GatewayError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Gateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Http(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Http(_) => StatusCode::BAD_GATEWAY,
            ApiError::Database(_)
            | ApiError::Migration(_)
            | ApiError::Config(_)
            | ApiError::Serialization(_)
            | ApiError::Io(_)
            | ApiError::UrlParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if the error is recoverable by retrying the request later
    pub fn is_recoverable(&self) -> bool {
        match self {
            ApiError::Database(_) => false,
            ApiError::Migration(_) => false,
            ApiError::Gateway(GatewayError::InvalidResponse(_)) => false,
            ApiError::Gateway(_) => true,
            ApiError::Config(_) => false,
            ApiError::Unauthenticated(_) => false,
            ApiError::Unauthorized(_) => false,
            ApiError::Forbidden(_) => false,
            ApiError::NotFound(_) => false,
            ApiError::Conflict(_) => false,
            ApiError::InvalidInput(_) => false,
            ApiError::Http(_) => true,
            ApiError::Serialization(_) => false,
            ApiError::Io(_) => true,
            ApiError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ApiError::Database(_) => ErrorSeverity::Critical,
            ApiError::Migration(_) => ErrorSeverity::Critical,
            ApiError::Config(_) => ErrorSeverity::Critical,
            ApiError::Unauthenticated(_) => ErrorSeverity::Warning,
            ApiError::Unauthorized(_) => ErrorSeverity::Warning,
            ApiError::Forbidden(_) => ErrorSeverity::Warning,
            ApiError::NotFound(_) => ErrorSeverity::Info,
            ApiError::Conflict(_) => ErrorSeverity::Info,
            ApiError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        match self.severity() {
            ErrorSeverity::Info => info!(status = status.as_u16(), error = %message, "Request rejected"),
            ErrorSeverity::Warning => warn!(status = status.as_u16(), error = %message, "Request denied"),
            ErrorSeverity::Error | ErrorSeverity::Critical => error!(
                status = status.as_u16(),
                severity = %self.severity(),
                recoverable = self.is_recoverable(),
                error = %message,
                "Request failed"
            ),
        }

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
