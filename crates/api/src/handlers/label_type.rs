//! Handlers for `/projects/{project_id}/label-types`.

use annotate_core::error::CoreError;
use annotate_core::label_kind::LabelKind;
use annotate_core::types::DbId;
use annotate_db::models::label_type::{CreateLabelType, LabelType};
use annotate_db::repositories::LabelTypeRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::project::find_project;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireProjectAdmin, RequireProjectStaff};
use crate::query::KindParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{project_id}/label-types?kind=
pub async fn list(
    State(state): State<AppState>,
    RequireProjectStaff(_user): RequireProjectStaff,
    Path(project_id): Path<DbId>,
    Query(params): Query<KindParams>,
) -> AppResult<Json<DataResponse<Vec<LabelType>>>> {
    let kind = params.kind.as_deref().map(LabelKind::from_str).transpose()?;
    find_project(&state.pool, project_id).await?;

    let label_types = LabelTypeRepo::list_by_project(&state.pool, project_id, kind).await?;
    Ok(Json(DataResponse { data: label_types }))
}

/// POST /api/v1/projects/{project_id}/label-types
pub async fn create(
    State(state): State<AppState>,
    RequireProjectAdmin(_user): RequireProjectAdmin,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateLabelType>,
) -> AppResult<(StatusCode, Json<LabelType>)> {
    input.validate()?;
    find_project(&state.pool, project_id).await?;

    let label_type = LabelTypeRepo::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(label_type)))
}

/// DELETE /api/v1/projects/{project_id}/label-types/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireProjectAdmin(_user): RequireProjectAdmin,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !LabelTypeRepo::delete(&state.pool, project_id, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "LabelType",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
