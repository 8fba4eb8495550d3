//! Handlers for `/projects/{project_id}/examples` and example states.

use annotate_core::error::CoreError;
use annotate_core::search::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use annotate_core::types::DbId;
use annotate_db::models::example::{CreateExample, Example, ExampleState, ToggleExampleState};
use annotate_db::repositories::{ExampleRepo, ExampleStateRepo, LabelTypeRepo};
use annotate_db::DbPool;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use super::project::find_project;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireProjectAdmin, RequireProjectMember, RequireProjectStaff};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for the state toggle.
#[derive(Debug, Serialize)]
pub struct ExampleStateResponse {
    pub example_id: DbId,
    /// Whether the example is confirmed after the toggle.
    pub confirmed: bool,
}

/// Load an example of the project or fail with 404.
pub(crate) async fn find_example(pool: &DbPool, project_id: DbId, id: DbId) -> AppResult<Example> {
    ExampleRepo::find_in_project(pool, project_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Example",
            id,
        }))
}

/// GET /api/v1/projects/{project_id}/examples
pub async fn list(
    State(state): State<AppState>,
    RequireProjectStaff(_user): RequireProjectStaff,
    Path(project_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Example>>>> {
    find_project(&state.pool, project_id).await?;
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let examples = ExampleRepo::list_by_project(&state.pool, project_id, limit, offset).await?;
    Ok(Json(DataResponse { data: examples }))
}

/// POST /api/v1/projects/{project_id}/examples
pub async fn create(
    State(state): State<AppState>,
    RequireProjectAdmin(_user): RequireProjectAdmin,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateExample>,
) -> AppResult<(StatusCode, Json<Example>)> {
    input.validate()?;
    if input.meta.as_ref().is_some_and(|m| !m.is_object()) {
        return Err(AppError::Core(CoreError::Validation(
            "meta must be a JSON object".into(),
        )));
    }
    find_project(&state.pool, project_id).await?;

    let example = ExampleRepo::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(example)))
}

/// GET /api/v1/projects/{project_id}/examples/{example_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireProjectStaff(_user): RequireProjectStaff,
    Path((project_id, example_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Example>> {
    let example = find_example(&state.pool, project_id, example_id).await?;
    Ok(Json(example))
}

/// GET /api/v1/projects/{project_id}/examples/{example_id}/states
///
/// Every member's confirmation of the example, oldest first.
pub async fn list_states(
    State(state): State<AppState>,
    RequireProjectStaff(_user): RequireProjectStaff,
    Path((project_id, example_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Vec<ExampleState>>>> {
    find_example(&state.pool, project_id, example_id).await?;
    let states = ExampleStateRepo::list_by_example(&state.pool, example_id).await?;
    Ok(Json(DataResponse { data: states }))
}

/// POST /api/v1/projects/{project_id}/examples/{example_id}/states
///
/// Toggles the caller's confirmation of the example. In a collaborative
/// project the confirmation is shared by all members.
pub async fn toggle_state(
    State(state): State<AppState>,
    RequireProjectMember(access): RequireProjectMember,
    Path((project_id, example_id)): Path<(DbId, DbId)>,
    Json(input): Json<ToggleExampleState>,
) -> AppResult<Json<ExampleStateResponse>> {
    let project = find_project(&state.pool, project_id).await?;
    find_example(&state.pool, project_id, example_id).await?;

    if let Some(label_type_id) = input.label_type_id {
        LabelTypeRepo::find_in_project(&state.pool, project_id, label_type_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!(
                    "Label type {label_type_id} does not belong to project {project_id}"
                )))
            })?;
    }

    let confirmed = ExampleStateRepo::toggle(
        &state.pool,
        example_id,
        access.user.user_id,
        input.label_type_id,
        project.collaborative_annotation,
    )
    .await?;

    Ok(Json(ExampleStateResponse {
        example_id,
        confirmed,
    }))
}
