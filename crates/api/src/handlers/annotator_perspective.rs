//! Handlers for `/perspectives/{perspective_id}/annotators`.
//!
//! A perspective carries at most one annotator. The repository performs the
//! check and the write in one locked transaction; this layer turns its
//! [`BindOutcome`] into HTTP results.

use annotate_core::error::CoreError;
use annotate_core::perspective::already_bound;
use annotate_core::types::DbId;
use annotate_db::models::perspective::{
    AnnotatorPerspective, BindOutcome, Perspective, UpdateAnnotatorPerspective,
};
use annotate_db::repositories::{AnnotatorPerspectiveRepo, PerspectiveRepo};
use annotate_db::DbPool;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

async fn find_perspective(pool: &DbPool, id: DbId) -> AppResult<Perspective> {
    PerspectiveRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Perspective",
            id,
        }))
}

fn binding_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "AnnotatorPerspective",
        id,
    })
}

/// GET /api/v1/perspectives/{perspective_id}/annotators
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(perspective_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<AnnotatorPerspective>>>> {
    find_perspective(&state.pool, perspective_id).await?;
    let bindings = AnnotatorPerspectiveRepo::list_by_perspective(&state.pool, perspective_id).await?;
    Ok(Json(DataResponse { data: bindings }))
}

/// POST /api/v1/perspectives/{perspective_id}/annotators
///
/// Binds the caller to the perspective.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(perspective_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<AnnotatorPerspective>)> {
    match AnnotatorPerspectiveRepo::bind(&state.pool, perspective_id, user.user_id).await? {
        BindOutcome::Bound(binding) => {
            tracing::info!(
                perspective_id,
                binding_id = binding.id,
                annotator_id = binding.annotator_id,
                "Perspective bound"
            );
            Ok((StatusCode::CREATED, Json(binding)))
        }
        BindOutcome::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Perspective",
            id: perspective_id,
        })),
        BindOutcome::AlreadyBound => Err(already_bound(perspective_id).into()),
    }
}

/// GET /api/v1/perspectives/{perspective_id}/annotators/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((perspective_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<AnnotatorPerspective>> {
    let binding = AnnotatorPerspectiveRepo::find_in_perspective(&state.pool, perspective_id, id)
        .await?
        .ok_or_else(|| binding_not_found(id))?;
    Ok(Json(binding))
}

/// PUT|PATCH /api/v1/perspectives/{perspective_id}/annotators/{id}
///
/// Moves the binding to another annotator and/or another perspective of
/// the same project. Rejected when the target perspective already has a
/// different binding.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((perspective_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateAnnotatorPerspective>,
) -> AppResult<Json<AnnotatorPerspective>> {
    let current = find_perspective(&state.pool, perspective_id).await?;
    let target_id = input.perspective_id.unwrap_or(perspective_id);
    if target_id != perspective_id {
        let target = find_perspective(&state.pool, target_id).await?;
        if target.project_id != current.project_id {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Perspective {target_id} belongs to another project"
            ))));
        }
    }

    match AnnotatorPerspectiveRepo::update(&state.pool, perspective_id, id, &input).await? {
        BindOutcome::Bound(binding) => {
            tracing::info!(
                binding_id = binding.id,
                perspective_id = binding.perspective_id,
                annotator_id = binding.annotator_id,
                "Perspective rebound"
            );
            Ok(Json(binding))
        }
        BindOutcome::NotFound => Err(binding_not_found(id)),
        BindOutcome::AlreadyBound => Err(already_bound(target_id).into()),
    }
}

/// DELETE /api/v1/perspectives/{perspective_id}/annotators/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((perspective_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !AnnotatorPerspectiveRepo::delete(&state.pool, perspective_id, id).await? {
        return Err(binding_not_found(id));
    }
    tracing::info!(perspective_id, binding_id = id, "Perspective unbound");
    Ok(StatusCode::NO_CONTENT)
}
