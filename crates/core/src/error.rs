use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// An id that can never match a row, such as a non-numeric path segment.
    #[error("Entity not found: {entity} with key '{key}'")]
    UnknownKey { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}
