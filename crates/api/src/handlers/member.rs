//! Handlers for `/projects/{project_id}/members`.

use annotate_core::error::CoreError;
use annotate_core::roles::PROJECT_ROLES;
use annotate_core::types::DbId;
use annotate_db::models::member::{CreateMember, Member};
use annotate_db::repositories::MemberRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::project::find_project;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireProjectAdmin, RequireProjectStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{project_id}/members
pub async fn list(
    State(state): State<AppState>,
    RequireProjectStaff(_user): RequireProjectStaff,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Member>>>> {
    find_project(&state.pool, project_id).await?;
    let members = MemberRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: members }))
}

/// POST /api/v1/projects/{project_id}/members
pub async fn create(
    State(state): State<AppState>,
    RequireProjectAdmin(user): RequireProjectAdmin,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateMember>,
) -> AppResult<(StatusCode, Json<Member>)> {
    if !PROJECT_ROLES.contains(&input.role.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid role '{}'. Must be one of: {}",
            input.role,
            PROJECT_ROLES.join(", ")
        ))));
    }
    find_project(&state.pool, project_id).await?;

    let member = MemberRepo::create(&state.pool, project_id, &input).await?;
    tracing::info!(
        project_id,
        member_user_id = member.user_id,
        role = %member.role,
        user_id = user.user_id,
        "Member added"
    );
    Ok((StatusCode::CREATED, Json(member)))
}

/// DELETE /api/v1/projects/{project_id}/members/{member_id}
pub async fn delete(
    State(state): State<AppState>,
    RequireProjectAdmin(_user): RequireProjectAdmin,
    Path((project_id, member_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !MemberRepo::delete(&state.pool, project_id, member_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Member",
            id: member_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
