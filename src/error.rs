// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Username already taken: {0}")]
    DuplicateUser(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Incorrect password")]
    BadCredential,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("No records in the selected date range")]
    EmptyDataset,

    #[error("Article feed error: {0}")]
    Feed(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
            AppError::DuplicateUser(name) => {
                (StatusCode::CONFLICT, "duplicate_user", Some(name.clone()))
            }
            // Distinct codes so the UI can tell "unknown user" apart
            // from "wrong password".
            AppError::UserNotFound(name) => (
                StatusCode::UNAUTHORIZED,
                "user_not_found",
                Some(name.clone()),
            ),
            AppError::BadCredential => (StatusCode::UNAUTHORIZED, "bad_credential", None),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::EmptyDataset => (StatusCode::UNPROCESSABLE_ENTITY, "empty_dataset", None),
            AppError::Feed(msg) => (StatusCode::BAD_GATEWAY, "feed_error", Some(msg.clone())),
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
