//! Handlers for `/projects/{project_id}/examples/{example_id}/{kind}` where
//! `kind` is `categories`, `spans` or `relations`.
//!
//! One set of handlers serves all three label kinds; the path segment picks
//! the [`LabelKind`] and the payload rules that apply.

use annotate_core::error::CoreError;
use annotate_core::label_kind::LabelKind;
use annotate_core::span::{overlaps, validate_offsets};
use annotate_core::types::DbId;
use annotate_db::models::example::Example;
use annotate_db::models::label::{CreateLabel, Label};
use annotate_db::models::project::Project;
use annotate_db::repositories::{LabelRepo, LabelTypeRepo};
use annotate_db::DbPool;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::example::find_example;
use super::project::find_project;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireProjectMember;
use crate::response::DataResponse;
use crate::state::AppState;

fn invalid(msg: String) -> AppError {
    AppError::Core(CoreError::Validation(msg))
}

/// GET /api/v1/projects/{project_id}/examples/{example_id}/{kind}
///
/// Every member's labels in a collaborative project, only the caller's
/// otherwise.
pub async fn list(
    State(state): State<AppState>,
    RequireProjectMember(access): RequireProjectMember,
    Path((project_id, example_id, segment)): Path<(DbId, DbId, String)>,
) -> AppResult<Json<DataResponse<Vec<Label>>>> {
    let kind = LabelKind::from_path_segment(&segment)?;
    let project = find_project(&state.pool, project_id).await?;
    find_example(&state.pool, project_id, example_id).await?;

    let author = (!project.collaborative_annotation).then_some(access.user.user_id);
    let labels = LabelRepo::list(&state.pool, kind, example_id, author).await?;
    Ok(Json(DataResponse { data: labels }))
}

/// POST /api/v1/projects/{project_id}/examples/{example_id}/{kind}
pub async fn create(
    State(state): State<AppState>,
    RequireProjectMember(access): RequireProjectMember,
    Path((project_id, example_id, segment)): Path<(DbId, DbId, String)>,
    Json(input): Json<CreateLabel>,
) -> AppResult<(StatusCode, Json<Label>)> {
    let kind = LabelKind::from_path_segment(&segment)?;
    let project = find_project(&state.pool, project_id).await?;
    let example = find_example(&state.pool, project_id, example_id).await?;
    let user_id = access.user.user_id;

    let label_type = LabelTypeRepo::find_in_project(&state.pool, project_id, input.label_type_id)
        .await?
        .ok_or_else(|| {
            invalid(format!(
                "Label type {} does not belong to project {project_id}",
                input.label_type_id
            ))
        })?;
    if label_type.kind != kind.as_str() {
        return Err(invalid(format!(
            "Label type {} is a {} label, not a {kind} label",
            label_type.id, label_type.kind
        )));
    }

    match kind {
        LabelKind::Category => {}
        LabelKind::Span => check_span(&state.pool, &project, &example, user_id, &input).await?,
        LabelKind::Relation => check_relation(&state.pool, example_id, &input).await?,
    }

    let label = LabelRepo::create(&state.pool, kind, example_id, user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(label)))
}

/// DELETE /api/v1/projects/{project_id}/examples/{example_id}/{kind}/{label_id}
///
/// Allowed for the label's author and for project admins.
pub async fn delete(
    State(state): State<AppState>,
    RequireProjectMember(access): RequireProjectMember,
    Path((project_id, example_id, segment, label_id)): Path<(DbId, DbId, String, DbId)>,
) -> AppResult<StatusCode> {
    let kind = LabelKind::from_path_segment(&segment)?;
    find_example(&state.pool, project_id, example_id).await?;

    let label = LabelRepo::find_by_id(&state.pool, kind, example_id, label_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Label",
            id: label_id,
        }))?;
    if label.user_id != access.user.user_id && !access.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author or a project admin may delete this label".into(),
        )));
    }

    LabelRepo::delete(&state.pool, kind, example_id, label_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Offsets must lie inside the text; without `allow_overlapping_spans` the
/// span must not overlap another span by the same user.
async fn check_span(
    pool: &DbPool,
    project: &Project,
    example: &Example,
    user_id: DbId,
    input: &CreateLabel,
) -> AppResult<()> {
    let (Some(start), Some(end)) = (input.start_offset, input.end_offset) else {
        return Err(invalid("Span labels require start_offset and end_offset".into()));
    };
    validate_offsets(start, end, example.text.chars().count())?;

    if !project.allow_overlapping_spans {
        let existing = LabelRepo::span_offsets(pool, example.id, user_id).await?;
        if existing.iter().any(|&other| overlaps((start, end), other)) {
            return Err(invalid(format!(
                "Span {start}..{end} overlaps an existing span"
            )));
        }
    }
    Ok(())
}

/// Both ends must be distinct spans on the same example.
async fn check_relation(pool: &DbPool, example_id: DbId, input: &CreateLabel) -> AppResult<()> {
    let (Some(from_id), Some(to_id)) = (input.from_id, input.to_id) else {
        return Err(invalid("Relation labels require from_id and to_id".into()));
    };
    if from_id == to_id {
        return Err(invalid("A relation must connect two different spans".into()));
    }

    let found = LabelRepo::count_spans_on_example(pool, example_id, &[from_id, to_id]).await?;
    if found != 2 {
        return Err(invalid(format!(
            "Spans {from_id} and {to_id} must both belong to example {example_id}"
        )));
    }
    Ok(())
}
