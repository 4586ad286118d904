//! Extractors whose rejections are `AppError`s, so every failure is a JSON
//! `{"message": ...}` body.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use estoes_core::error::CoreError;
use estoes_core::types::DbId;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has been deserialized into `T` and passed `T::validate`.
///
/// Malformed JSON, a wrong content type or a missing/mistyped field is a
/// `400` with the parser's explanation; a failed validation rule is a `400`
/// listing the offending fields. Either way the handler never runs.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| AppError::Core(CoreError::Validation(errors.to_string())))?;

        Ok(Self(value))
    }
}

/// The `{id}` segment of a `/projects/{id}` route.
///
/// A segment that is not an `i64` cannot name any project, so it is answered
/// exactly like a missing one: `404 {"message": "Project not found"}`.
#[derive(Debug, Clone, Copy)]
pub struct ProjectId(pub DbId);

impl<S> FromRequestParts<S> for ProjectId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        match raw.parse::<DbId>() {
            Ok(id) => Ok(Self(id)),
            Err(_) => {
                tracing::debug!(key = %raw, "Project id is not an integer");
                Err(AppError::unknown_key("Project", raw))
            }
        }
    }
}
