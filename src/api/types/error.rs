//! API error envelope
//!
//! Every failure leaving the service uses the same body shape:
//! `{"status": <code>, "reason": <string-or-mapping>}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::user::Violations;
use crate::domain::DomainError;

/// Failure reason: a plain message or a field violation mapping
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ErrorReason {
    Message(String),
    Violations(Violations),
}

/// Uniform error body with the status code repeated inside it
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub reason: ErrorReason,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ApiErrorBody,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, reason: ErrorReason) -> Self {
        Self {
            status,
            body: ApiErrorBody {
                status: status.as_u16(),
                reason,
            },
        }
    }

    /// Bad request with a plain message
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorReason::Message(message.into()),
        )
    }

    /// Bad request carrying the full violation mapping
    pub fn validation(violations: Violations) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorReason::Violations(violations))
    }

    /// Authentication failure
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            ErrorReason::Message(message.into()),
        )
    }

    /// Not found; the reason is always the generic "Not found"
    pub fn not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            ErrorReason::Message("Not found".to_string()),
        )
    }

    /// Internal server error, message passed through
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorReason::Message(message.into()),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            // Generic on purpose: a bad token and a cleared token look alike
            DomainError::NotFound { .. } => Self::not_found(),
            DomainError::Validation { violations } => Self::validation(violations),
            DomainError::Credential { message } => Self::unauthorized(message),
            DomainError::Conflict { message } => Self::bad_request(message),
            DomainError::Configuration { message } => Self::internal(message),
            DomainError::Storage { message } => Self::internal(message),
            DomainError::Internal { message } => Self::internal(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.body.reason {
            ErrorReason::Message(message) => write!(f, "{}: {}", self.body.status, message),
            ErrorReason::Violations(violations) => {
                write!(f, "{}: {}", self.body.status, violations)
            }
        }
    }
}

impl std::error::Error for ApiError {}
