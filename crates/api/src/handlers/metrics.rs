//! Statistics endpoints under `/projects/{project_id}`.
//!
//! Each handler loads counts through [`StatisticsRepo`] and hands them to
//! the pure aggregation functions in `annotate_core`.

use std::collections::HashMap;

use annotate_core::annotator_report::{
    annotator_report as build_annotator_report, AnnotatorReport,
};
use annotate_core::disagreement::{disagreement_items, ComparableAnnotation, DisagreementItem};
use annotate_core::distribution::{
    label_distribution, member_label_choices as build_label_choices, LabelChoice, LabelChoices,
    LabelCount, LabelDistribution,
};
use annotate_core::error::CoreError;
use annotate_core::label_kind::LabelKind;
use annotate_core::progress::{member_progress, MemberRef, MembersProgressReport, Progress};
use annotate_core::report::{build_annotations_report, AnnotationsReport, ReportAnnotation};
use annotate_core::types::DbId;
use annotate_db::models::statistics::AnnotationFilter;
use annotate_db::repositories::{
    ExampleRepo, LabelTypeRepo, MemberRepo, PerspectiveRepo, StatisticsRepo,
};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use super::example::find_example;
use super::project::find_project;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireProjectStaff;
use crate::query::{ExampleFilterParams, ReportFilterParams};
use crate::state::AppState;

/// Response body for the disagreement report.
#[derive(Debug, Serialize)]
pub struct DisagreementReport {
    pub items: Vec<DisagreementItem>,
}

/// GET /api/v1/projects/{project_id}/progress
///
/// Counts the caller's confirmations, or anyone's in a collaborative project.
pub async fn progress(
    State(state): State<AppState>,
    RequireProjectStaff(user): RequireProjectStaff,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Progress>> {
    let project = find_project(&state.pool, project_id).await?;
    let total = ExampleRepo::count_by_project(&state.pool, project_id).await?;
    let confirmed_by = (!project.collaborative_annotation).then_some(user.user_id);
    let complete = StatisticsRepo::count_done(&state.pool, project_id, confirmed_by).await?;
    Ok(Json(Progress::new(total, complete)))
}

/// GET /api/v1/projects/{project_id}/members-progress
pub async fn members_progress(
    State(state): State<AppState>,
    RequireProjectStaff(_user): RequireProjectStaff,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<MembersProgressReport>> {
    let project = find_project(&state.pool, project_id).await?;
    let total = ExampleRepo::count_by_project(&state.pool, project_id).await?;

    let members = member_refs(&state, project_id).await?;

    let done_counts: HashMap<DbId, i64> = StatisticsRepo::done_counts_by_user(&state.pool, project_id)
        .await?
        .into_iter()
        .map(|row| (row.user_id, row.done))
        .collect();

    let collaborative_done = if project.collaborative_annotation {
        Some(StatisticsRepo::count_done(&state.pool, project_id, None).await?)
    } else {
        None
    };

    Ok(Json(member_progress(
        total,
        &members,
        &done_counts,
        collaborative_done,
    )))
}

/// GET /api/v1/projects/{project_id}/category-distribution?example=
pub async fn category_distribution(
    State(state): State<AppState>,
    RequireProjectStaff(_user): RequireProjectStaff,
    Path(project_id): Path<DbId>,
    Query(params): Query<ExampleFilterParams>,
) -> AppResult<Json<LabelDistribution>> {
    distribution(&state, project_id, LabelKind::Category, params.example).await
}

/// GET /api/v1/projects/{project_id}/span-distribution?example=
pub async fn span_distribution(
    State(state): State<AppState>,
    RequireProjectStaff(_user): RequireProjectStaff,
    Path(project_id): Path<DbId>,
    Query(params): Query<ExampleFilterParams>,
) -> AppResult<Json<LabelDistribution>> {
    distribution(&state, project_id, LabelKind::Span, params.example).await
}

/// GET /api/v1/projects/{project_id}/relation-distribution?example=
pub async fn relation_distribution(
    State(state): State<AppState>,
    RequireProjectStaff(_user): RequireProjectStaff,
    Path(project_id): Path<DbId>,
    Query(params): Query<ExampleFilterParams>,
) -> AppResult<Json<LabelDistribution>> {
    distribution(&state, project_id, LabelKind::Relation, params.example).await
}

/// Zero-filled `label -> username -> count` for one label kind.
async fn distribution(
    state: &AppState,
    project_id: DbId,
    kind: LabelKind,
    example: Option<DbId>,
) -> AppResult<Json<LabelDistribution>> {
    find_project(&state.pool, project_id).await?;
    if let Some(example_id) = example {
        find_example(&state.pool, project_id, example_id).await?;
    }

    let labels = LabelTypeRepo::texts(&state.pool, project_id, kind).await?;
    let usernames = member_usernames(state, project_id).await?;
    let rows: Vec<LabelCount> = StatisticsRepo::label_counts(&state.pool, project_id, kind, example)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(label_distribution(&labels, &usernames, &rows)))
}

/// GET /api/v1/projects/{project_id}/member-label-choices
pub async fn member_label_choices(
    State(state): State<AppState>,
    RequireProjectStaff(_user): RequireProjectStaff,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<LabelChoices>> {
    find_project(&state.pool, project_id).await?;
    let usernames = member_usernames(&state, project_id).await?;
    let rows: Vec<LabelChoice> = StatisticsRepo::member_choices(&state.pool, project_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(build_label_choices(&usernames, &rows)))
}

/// GET /api/v1/projects/{project_id}/annotations-report
pub async fn annotations_report(
    State(state): State<AppState>,
    RequireProjectStaff(_user): RequireProjectStaff,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<AnnotationsReport>> {
    find_project(&state.pool, project_id).await?;

    let examples = ExampleRepo::list_texts(&state.pool, project_id).await?;
    let spans = report_annotations(&state, project_id, LabelKind::Span).await?;
    let categories = report_annotations(&state, project_id, LabelKind::Category).await?;
    let span_labels = LabelTypeRepo::texts(&state.pool, project_id, LabelKind::Span).await?;
    let category_labels =
        LabelTypeRepo::texts(&state.pool, project_id, LabelKind::Category).await?;

    Ok(Json(build_annotations_report(
        examples,
        spans,
        categories,
        &span_labels,
        &category_labels,
    )))
}

/// GET /api/v1/projects/{project_id}/disagreement-report?member=&perspective=
pub async fn disagreement_report(
    State(state): State<AppState>,
    RequireProjectStaff(_user): RequireProjectStaff,
    Path(project_id): Path<DbId>,
    Query(params): Query<ReportFilterParams>,
) -> AppResult<Json<DisagreementReport>> {
    let annotations = comparable_annotations(&state, project_id, &params).await?;
    Ok(Json(DisagreementReport {
        items: disagreement_items(&annotations),
    }))
}

/// GET /api/v1/projects/{project_id}/annotator-report?member=&perspective=
///
/// One entry per project member, including members the filters leave with
/// no labels.
pub async fn annotator_report(
    State(state): State<AppState>,
    RequireProjectStaff(_user): RequireProjectStaff,
    Path(project_id): Path<DbId>,
    Query(params): Query<ReportFilterParams>,
) -> AppResult<Json<AnnotatorReport>> {
    let annotations = comparable_annotations(&state, project_id, &params).await?;
    let members = member_refs(&state, project_id).await?;

    Ok(Json(build_annotator_report(&members, &annotations)))
}

/// Span and category annotations of the project, narrowed by `params`.
/// A perspective from another project is a 404.
async fn comparable_annotations(
    state: &AppState,
    project_id: DbId,
    params: &ReportFilterParams,
) -> AppResult<Vec<ComparableAnnotation>> {
    find_project(&state.pool, project_id).await?;
    if let Some(perspective_id) = params.perspective {
        PerspectiveRepo::find_in_project(&state.pool, project_id, perspective_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Perspective",
                id: perspective_id,
            }))?;
    }

    let filter = AnnotationFilter {
        member: params.member,
        perspective: params.perspective,
    };
    let mut annotations = Vec::new();
    for kind in [LabelKind::Span, LabelKind::Category] {
        let rows = StatisticsRepo::annotations(&state.pool, project_id, kind, filter).await?;
        annotations.extend(rows.into_iter().map(ComparableAnnotation::from));
    }
    Ok(annotations)
}

async fn member_refs(state: &AppState, project_id: DbId) -> AppResult<Vec<MemberRef>> {
    let members = MemberRepo::list_by_project(&state.pool, project_id).await?;
    Ok(members
        .into_iter()
        .map(|m| MemberRef {
            user_id: m.user_id,
            username: m.username,
        })
        .collect())
}

async fn member_usernames(state: &AppState, project_id: DbId) -> AppResult<Vec<String>> {
    let members = MemberRepo::list_by_project(&state.pool, project_id).await?;
    Ok(members.into_iter().map(|m| m.username).collect())
}

async fn report_annotations(
    state: &AppState,
    project_id: DbId,
    kind: LabelKind,
) -> AppResult<Vec<ReportAnnotation>> {
    let rows =
        StatisticsRepo::annotations(&state.pool, project_id, kind, AnnotationFilter::default())
            .await?;
    Ok(rows.into_iter().map(ReportAnnotation::from).collect())
}
