use std::sync::Arc;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Shared handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

const MSG_ARGUMENTS_NOT_VALID: &str = "Arguments not valid";
const MSG_NOT_FOUND: &str = "Not found";
const MSG_CONFLICT: &str = "Conflict";
const MSG_UNEXPECTED: &str = "Unexpected error";

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("arguments not valid: {}", .0.join("; "))]
    InvalidInput(Vec<String>),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unexpected error: {0}")]
    Internal(Arc<anyhow::Error>),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidInput(vec![detail.into()])
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(Arc::new(err.into()))
    }

    /// Envelope written to the response body.
    pub fn to_message(&self) -> ErrorMessage {
        match self {
            ApiError::InvalidInput(errors) => {
                ErrorMessage::new(MSG_ARGUMENTS_NOT_VALID, errors.clone())
            }
            ApiError::NotFound(detail) => ErrorMessage::new(MSG_NOT_FOUND, vec![detail.clone()]),
            ApiError::Conflict(detail) => ErrorMessage::new(MSG_CONFLICT, vec![detail.clone()]),
            ApiError::Internal(err) => {
                ErrorMessage::new(MSG_UNEXPECTED, vec![format!("{err:#}")])
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::internal(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid(rejection.body_text())
    }
}

/// JSON error envelope: `{"message": ..., "errors": [...]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        } else {
            tracing::warn!(code = self.code(), error = %self, "request rejected");
        }
        (status, Json(self.to_message())).into_response()
    }
}
