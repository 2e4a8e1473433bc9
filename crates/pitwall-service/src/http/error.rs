//! HTTP error responses

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::{StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::error::ServiceError;

/// Errors returned by route handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed path or body, or a submission the league rejects
    #[error("Bad request: {message}")]
    BadRequest {
        /// What was wrong with the request
        message: String,
    },

    /// The addressed record does not exist
    #[error("Not found: {message}")]
    NotFound {
        /// Which record was missing
        message: String,
    },

    /// No usable basic auth credentials
    #[error("Editor credentials required")]
    Unauthorized,

    /// Credentials do not belong to an editor
    #[error("Not an editor")]
    Forbidden,

    /// Storage or data integrity failure; details are only logged
    #[error("Internal server error")]
    Internal,
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code
    pub code: &'static str,
    /// Error message
    pub message: String,
}

impl ApiError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::Forbidden => "FORBIDDEN",
            ApiError::Internal => "INTERNAL_ERROR",
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound {
                message: err.to_string(),
            }
        } else if err.is_bad_input() {
            ApiError::bad_request(err.to_string())
        } else {
            warn!(error = %err, "Request failed");
            ApiError::Internal
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            code: self.error_code(),
            message: self.to_string(),
        });

        match self {
            ApiError::Unauthorized => (
                status,
                [(WWW_AUTHENTICATE, r#"Basic realm="pitwall""#)],
                body,
            )
                .into_response(),
            _ => (status, body).into_response(),
        }
    }
}
