use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::auth::{jwt::TokenError, password::PasswordError, repo::StoreError};
use crate::records::RecordError;

/// Caller-visible failure of any operation. Messages are deliberately generic
/// for everything that could help enumerate accounts or forge tokens.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("{0}")]
    Conflict(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Invalid token")]
    TokenInvalid,
    #[error("Server configuration error")]
    Configuration,
    #[error("Internal server error")]
    StorageUnavailable,
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::DuplicateEmail | ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InvalidCredentials | ApiError::TokenInvalid => StatusCode::UNAUTHORIZED,
            ApiError::Configuration | ApiError::StorageUnavailable | ApiError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ApiError::DuplicateEmail,
            StoreError::NotFound => ApiError::InvalidCredentials,
            StoreError::Unavailable(e) => {
                error!(error = %e, "account store unavailable");
                ApiError::StorageUnavailable
            }
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        error!(error = %err, "password hashing failed");
        ApiError::Internal
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        error!(error = %err, "token signing failed");
        ApiError::Configuration
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Conflict(msg) => ApiError::Conflict(msg),
            RecordError::UnknownCategory => ApiError::Validation("Unknown category".into()),
            RecordError::Unavailable(e) => {
                error!(error = %e, "record store unavailable");
                ApiError::StorageUnavailable
            }
        }
    }
}
