use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use estoes_core::error::CoreError;

use crate::response::MessageResponse;

/// Message returned for every 500, whatever the cause.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{"message": ...}` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `estoes_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// The `NotFound` error for a missing entity.
    pub fn not_found(entity: &'static str, id: estoes_core::types::DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }

    /// The `NotFound` error for a key that could never name a row.
    pub fn unknown_key(entity: &'static str, key: impl Into<String>) -> Self {
        AppError::Core(CoreError::UnknownKey {
            entity,
            key: key.into(),
        })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(
                CoreError::NotFound { entity, .. } | CoreError::UnknownKey { entity, .. },
            ) => (StatusCode::NOT_FOUND, format!("{entity} not found")),
            AppError::Core(CoreError::Validation(msg)) | AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, axum::Json(MessageResponse::new(message))).into_response()
    }
}
