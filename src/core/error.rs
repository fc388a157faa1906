use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Centralized error types for the application
///
/// Handler and web-layer failures converge on this enum. The HTTP layer turns
/// it into a status code plus a `{"error": ...}` JSON body.
#[derive(Error, Debug)]
pub enum AppError {
    /// Webhook hit while no bot token is configured
    #[error("Bot not configured")]
    NotConfigured,

    /// Path token or secret header did not match
    #[error("Unauthorized")]
    Unauthorized,

    /// Update body could not be decoded
    #[error("Invalid update payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Anything else that should surface as a 500
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidPayload(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Telegram(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            log::error!("Request failed: {}", self);
        } else {
            log::warn!("Request rejected ({}): {}", status.as_u16(), self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
