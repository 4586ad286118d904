//! Handlers for the `/projects` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use estoes_core::pagination::PageRequest;
use estoes_db::models::project::{AssignUsers, CreateProject, Project, UpdateProject};
use estoes_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ProjectId, ValidatedJson};
use crate::query::{PaginationParams, SearchParams};
use crate::response::{MessageResponse, ProjectPage};
use crate::state::AppState;

const ENTITY: &str = "Project";

/// Confirmation returned after replacing a project's assignments.
pub const USERS_ASSIGNED_MESSAGE: &str = "Users assigned to project successfully";

/// POST /projects
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = project.id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /projects?page=&limit=
pub async fn list(
    State(state): State<AppState>,
    params: PaginationParams,
) -> AppResult<Json<ProjectPage>> {
    let window = PageRequest::from_raw(params.page.as_deref(), params.limit.as_deref());
    let (projects, total) = ProjectRepo::list(&state.pool, &window).await?;
    Ok(Json(ProjectPage {
        projects,
        page: window.page,
        limit: window.limit,
        total,
    }))
}

/// GET /projects/search?name=
pub async fn search(
    State(state): State<AppState>,
    params: SearchParams,
) -> AppResult<Json<Vec<Project>>> {
    let fragment = params.name.unwrap_or_default();
    let projects = ProjectRepo::search(&state.pool, &fragment).await?;
    Ok(Json(projects))
}

/// GET /projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ProjectId(id): ProjectId,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    Ok(Json(project))
}

/// PUT /projects/{id}
pub async fn update(
    State(state): State<AppState>,
    ProjectId(id): ProjectId,
    ValidatedJson(input): ValidatedJson<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    Ok(Json(project))
}

/// DELETE /projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    ProjectId(id): ProjectId,
) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.pool, id).await? {
        tracing::info!(project_id = id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(ENTITY, id))
    }
}

/// POST /projects/{id}/users
///
/// Replaces the whole assignment set. `userIds` may be a bare id or a list.
pub async fn assign_users(
    State(state): State<AppState>,
    ProjectId(id): ProjectId,
    ValidatedJson(input): ValidatedJson<AssignUsers>,
) -> AppResult<Json<MessageResponse>> {
    let user_ids = input.user_ids.normalize();
    if !ProjectRepo::assign_users(&state.pool, id, &user_ids).await? {
        return Err(AppError::not_found(ENTITY, id));
    }
    Ok(Json(MessageResponse::new(USERS_ASSIGNED_MESSAGE)))
}
