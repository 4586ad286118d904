pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// ```text
/// /projects                  list, create
/// /projects/search           search by name
/// /projects/{id}             get, update, delete
/// /projects/{id}/users       replace assignments
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/projects", project::router())
}
