//! Maps domain errors to HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use weightshare_core::error::{AppError, ErrorKind};
use weightshare_service::ShareError;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Every failure a handler or middleware can return.
#[derive(Debug)]
pub enum ApiError {
    /// A share operation failed.
    Share(ShareError),
    /// An infrastructure or cross-cutting failure.
    App(AppError),
    /// The request body exceeded the configured limit.
    PayloadTooLarge(String),
}

impl From<ShareError> for ApiError {
    fn from(err: ShareError) -> Self {
        Self::Share(err)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(rejection.body_text())
        } else {
            Self::Share(ShareError::invalid(rejection.body_text()))
        }
    }
}

impl ApiError {
    /// Status code and machine-readable code for this error.
    fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Share(ShareError::InvalidInput(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            Self::Share(ShareError::NotFound) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Share(ShareError::StoreUnavailable) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORE_UNAVAILABLE")
            }
            Self::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            Self::App(err) => match err.kind {
                ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
                ErrorKind::RateLimit => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
                ErrorKind::ServiceUnavailable => {
                    (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
                }
                ErrorKind::Internal
                | ErrorKind::Database
                | ErrorKind::Configuration
                | ErrorKind::Serialization => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                }
            },
        }
    }

    /// Message safe to show a caller. Infrastructure details stay in the log.
    fn public_message(&self, status: StatusCode) -> String {
        match self {
            Self::Share(err) => err.to_string(),
            Self::PayloadTooLarge(msg) => msg.clone(),
            Self::App(err) if status.is_server_error() => {
                tracing::error!(error = %err, "Internal server error");
                "Internal server error".to_string()
            }
            Self::App(err) => err.message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.classify();
        let body = ApiErrorResponse {
            success: false,
            error: error_code.to_string(),
            message: self.public_message(status),
        };

        (status, Json(body)).into_response()
    }
}
