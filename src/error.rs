use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepoError;

/// Errors surfaced by handlers. Every variant maps to one status code and one
/// fixed external message; internal detail only reaches the logs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("unauthenticated")]
    Unauthenticated,

    #[error("forbidden")]
    Forbidden,

    #[error("email already exists")]
    DuplicateEmail,

    #[error("rating out of range")]
    InvalidRating,

    #[error("user not found")]
    UserNotFound,

    #[error("store not found")]
    StoreNotFound,

    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] RepoError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationFailed(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::ValidationFailed(_) | Self::DuplicateEmail | Self::InvalidRating => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::StoreNotFound => StatusCode::NOT_FOUND,
            Self::StorageUnavailable(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::ValidationFailed(msg) => msg.clone(),
            Self::InvalidCredentials => "Invalid credentials".into(),
            Self::Unauthenticated => "Unauthorized".into(),
            Self::Forbidden => "Forbidden".into(),
            Self::DuplicateEmail => "Email already exists".into(),
            Self::InvalidRating => "Rating must be an integer between 1 and 5".into(),
            Self::UserNotFound => "User not found".into(),
            Self::StoreNotFound => "Store not found".into(),
            Self::StorageUnavailable(_) | Self::Internal(_) => "Internal server error".into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        Self::StorageUnavailable(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "request body rejected");
        let msg = match rejection {
            JsonRejection::MissingJsonContentType(_) => "Request body must be JSON",
            JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON",
            _ => "Request body has missing or invalid fields",
        };
        Self::validation(msg)
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "path rejected");
        Self::validation("Invalid path parameter")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::StorageUnavailable(e) => tracing::error!(error = %e, "storage failure"),
            Self::Internal(e) => tracing::error!(error = %e, "internal failure"),
            _ => {}
        }
        let status = self.status();
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
