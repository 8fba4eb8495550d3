//! Handlers for the `/projects` resource.

use annotate_core::error::CoreError;
use annotate_core::project::validate_project_name;
use annotate_core::search::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use annotate_core::types::DbId;
use annotate_db::models::project::{CreateProject, Project, UpdateProject};
use annotate_db::repositories::ProjectRepo;
use annotate_db::DbPool;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireProjectAdmin, RequireProjectStaff, RequireStaff};
use crate::query::ProjectListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `DELETE /projects`.
#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    #[serde(default)]
    pub ids: Vec<DbId>,
}

/// Load a project or fail with 404.
pub(crate) async fn find_project(pool: &DbPool, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// GET /api/v1/projects
///
/// Projects the caller is a member of, newest first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let search = params.search.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let projects = ProjectRepo::list_for_user(&state.pool, user.user_id, search, limit, offset).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects
///
/// The creator is granted `project_admin` in the same transaction.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.validate()?;
    validate_project_name(&input.name)?;

    let project = ProjectRepo::create_with_admin(&state.pool, &input, user.user_id).await?;
    tracing::info!(project_id = project.id, user_id = user.user_id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// DELETE /api/v1/projects
///
/// Deletes each listed project on which the caller is project admin. Every
/// deletion is its own statement; ids the caller does not administer are
/// skipped silently. A body whose `ids` is not a list of integers is a 400.
pub async fn bulk_delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    payload: Result<Json<BulkDeleteRequest>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(input) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    if input.ids.is_empty() {
        return Err(AppError::BadRequest(
            "ids must be a non-empty list of project ids".into(),
        ));
    }

    let owned = ProjectRepo::admin_project_ids(&state.pool, user.user_id, &input.ids).await?;
    for id in owned {
        if ProjectRepo::delete(&state.pool, id).await? {
            tracing::info!(project_id = id, user_id = user.user_id, "Project deleted");
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/projects/{project_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireProjectStaff(_user): RequireProjectStaff,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = find_project(&state.pool, project_id).await?;
    Ok(Json(project))
}

/// PUT|PATCH /api/v1/projects/{project_id}
pub async fn update(
    State(state): State<AppState>,
    RequireProjectAdmin(_user): RequireProjectAdmin,
    Path(project_id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    input.validate()?;
    if let Some(name) = &input.name {
        validate_project_name(name)?;
    }

    let project = ProjectRepo::update(&state.pool, project_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{project_id}
pub async fn delete(
    State(state): State<AppState>,
    RequireProjectAdmin(user): RequireProjectAdmin,
    Path(project_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ProjectRepo::delete(&state.pool, project_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }));
    }
    tracing::info!(project_id, user_id = user.user_id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/projects/{project_id}/clone
///
/// Copies configuration (members, tags, label types, perspectives) but no
/// examples or annotations. Runs in one transaction.
pub async fn clone(
    State(state): State<AppState>,
    RequireProjectAdmin(user): RequireProjectAdmin,
    Path(project_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = ProjectRepo::clone_project(&state.pool, project_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    tracing::info!(
        source_id = project_id,
        project_id = project.id,
        user_id = user.user_id,
        "Project cloned"
    );
    Ok((StatusCode::CREATED, Json(project)))
}
