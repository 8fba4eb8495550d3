//! Handlers for `/projects/{project_id}/perspectives`.

use annotate_core::error::CoreError;
use annotate_core::types::DbId;
use annotate_db::models::perspective::{CreatePerspective, Perspective};
use annotate_db::repositories::{ExampleRepo, PerspectiveRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::project::find_project;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireProjectAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Perspective",
        id,
    })
}

/// GET /api/v1/projects/{project_id}/perspectives
pub async fn list(
    State(state): State<AppState>,
    RequireProjectAdmin(_user): RequireProjectAdmin,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Perspective>>>> {
    find_project(&state.pool, project_id).await?;
    let perspectives = PerspectiveRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: perspectives }))
}

/// POST /api/v1/projects/{project_id}/perspectives
pub async fn create(
    State(state): State<AppState>,
    RequireProjectAdmin(user): RequireProjectAdmin,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreatePerspective>,
) -> AppResult<(StatusCode, Json<Perspective>)> {
    input.validate()?;
    find_project(&state.pool, project_id).await?;

    let perspective =
        PerspectiveRepo::create(&state.pool, project_id, user.user_id, &input).await?;
    tracing::info!(
        project_id,
        perspective_id = perspective.id,
        user_id = user.user_id,
        "Perspective created"
    );
    Ok((StatusCode::CREATED, Json(perspective)))
}

/// GET /api/v1/projects/{project_id}/perspectives/{perspective_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireProjectAdmin(_user): RequireProjectAdmin,
    Path((project_id, perspective_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Perspective>> {
    let perspective = PerspectiveRepo::find_in_project(&state.pool, project_id, perspective_id)
        .await?
        .ok_or_else(|| not_found(perspective_id))?;
    Ok(Json(perspective))
}

/// DELETE /api/v1/projects/{project_id}/perspectives/{perspective_id}
///
/// Refused once the project holds any example.
pub async fn delete(
    State(state): State<AppState>,
    RequireProjectAdmin(user): RequireProjectAdmin,
    Path((project_id, perspective_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    PerspectiveRepo::find_in_project(&state.pool, project_id, perspective_id)
        .await?
        .ok_or_else(|| not_found(perspective_id))?;

    if ExampleRepo::exists_in_project(&state.pool, project_id).await? {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot delete perspectives already in use.".into(),
        )));
    }

    PerspectiveRepo::delete(&state.pool, project_id, perspective_id).await?;
    tracing::info!(project_id, perspective_id, user_id = user.user_id, "Perspective deleted");
    Ok(StatusCode::NO_CONTENT)
}
