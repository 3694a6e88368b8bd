//! HTTP error mapping.
//!
//! Handlers return `Result<Response, AppError>`; this is the only place a
//! domain error becomes a status code. Every error body is
//! `{"error": "<message>"}`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pet_affiliate::AffiliateError;
use pet_core::errors::CoreError;
use pet_db::error::DatabaseError;
use serde_json::json;
use thiserror::Error;

use crate::response::json_response;

#[derive(Error, Debug)]
pub enum AppError {
    /// Request was well-formed but its content is unacceptable.
    #[error("{0}")]
    Validation(String),

    /// Body, path, or query could not be decoded.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(DatabaseError),

    #[error("Affiliate feed error: {0}")]
    Upstream(#[from] AffiliateError),
}

impl AppError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Core(CoreError::NotFound { .. }) => Self::NotFound(err.to_string()),
            DatabaseError::Core(CoreError::Validation(message)) => Self::Validation(message),
            other => Self::Storage(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedPayload(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::MalformedPayload(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::MalformedPayload(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        json_response(status, &json!({ "error": self.to_string() }))
    }
}
