//! Error types for the inventory server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable numeric error codes exposed to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    BackendFailure = 3,
    NoSuchRecord = 5,
    Duplicate = 8,
    BadValue = 18,
    NotReady = 22,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A required field is missing or a value is outside its enumeration.
    /// Raised before any backend call is made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serial number collision
    #[error("{0}")]
    DuplicateKey(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Any failure of the remote data service (network, permission, unavailable)
    #[error("{0}")]
    Transport(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Session context has not finished initializing
    #[error("Session not ready")]
    NotReady,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::DuplicateKey(msg)
            | AppError::Transport(msg)
            | AppError::BadRequest(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Authentication(msg) => msg.clone(),
            AppError::NotReady => "Session is still loading".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Errors the failure policy lets through untouched
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::DuplicateKey(_) | AppError::NotFound(_)
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                errs.iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
            .collect();
        fields.sort();
        AppError::Validation(fields.join("; "))
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue),
            AppError::DuplicateKey(_) => (StatusCode::CONFLICT, ErrorCode::Duplicate),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchRecord),
            AppError::Transport(msg) => {
                tracing::error!("Backend error: {}", msg);
                (StatusCode::BAD_GATEWAY, ErrorCode::BackendFailure)
            }
            AppError::Authentication(_) => (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized),
            AppError::NotReady => (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::NotReady),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure)
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message: self.user_message(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
