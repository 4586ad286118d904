//! Shared response body types for API handlers.

use estoes_db::models::project::Project;
use serde::Serialize;

/// `{ "message": ... }` body used for confirmations and errors.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One page of projects plus the window that produced it.
#[derive(Debug, Serialize)]
pub struct ProjectPage {
    pub projects: Vec<Project>,
    pub page: i64,
    pub limit: i64,
    /// Count of all projects, independent of the window.
    pub total: i64,
}
