//! Aggregation queries behind the progress, distribution and report
//! endpoints.

use annotate_core::label_kind::LabelKind;
use annotate_core::types::DbId;
use sqlx::PgPool;

use crate::models::statistics::{
    AnnotationFilter, AnnotationRow, DoneCountRow, LabelCountRow, MemberChoiceRow,
};

pub struct StatisticsRepo;

impl StatisticsRepo {
    /// Distinct examples of the project marked done, by anyone or (when
    /// `user_id` is set) by that user only.
    pub async fn count_done(
        pool: &PgPool,
        project_id: DbId,
        user_id: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT s.example_id)
             FROM example_states s
             JOIN examples e ON e.id = s.example_id
             WHERE e.project_id = $1 AND ($2::BIGINT IS NULL OR s.confirmed_by = $2)",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Distinct examples of the project each user has marked done.
    pub async fn done_counts_by_user(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<DoneCountRow>, sqlx::Error> {
        sqlx::query_as::<_, DoneCountRow>(
            "SELECT s.confirmed_by AS user_id, COUNT(DISTINCT s.example_id) AS done
             FROM example_states s
             JOIN examples e ON e.id = s.example_id
             WHERE e.project_id = $1
             GROUP BY s.confirmed_by",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Count labels of `kind` per (label text, author) across the project,
    /// or on a single example when `example_id` is set.
    pub async fn label_counts(
        pool: &PgPool,
        project_id: DbId,
        kind: LabelKind,
        example_id: Option<DbId>,
    ) -> Result<Vec<LabelCountRow>, sqlx::Error> {
        let query = format!(
            "SELECT lt.text AS label, u.username, COUNT(*) AS count
             FROM {table} l
             JOIN examples e ON e.id = l.example_id
             JOIN label_types lt ON lt.id = l.label_type_id
             JOIN users u ON u.id = l.user_id
             WHERE e.project_id = $1 AND ($2::BIGINT IS NULL OR l.example_id = $2)
             GROUP BY lt.text, u.username",
            table = kind.table(),
        );
        sqlx::query_as::<_, LabelCountRow>(&query)
            .bind(project_id)
            .bind(example_id)
            .fetch_all(pool)
            .await
    }

    /// Every confirmation by a current project member, with the chosen label.
    pub async fn member_choices(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<MemberChoiceRow>, sqlx::Error> {
        sqlx::query_as::<_, MemberChoiceRow>(
            "SELECT u.username, s.example_id, lt.text AS label
             FROM example_states s
             JOIN examples e ON e.id = s.example_id
             JOIN members m ON m.project_id = e.project_id AND m.user_id = s.confirmed_by
             JOIN users u ON u.id = s.confirmed_by
             LEFT JOIN label_types lt ON lt.id = s.label_type_id
             WHERE e.project_id = $1
             ORDER BY u.username, s.example_id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Every label of `kind` in the project with author and label text,
    /// ordered by example then id. Offsets are only set for spans.
    ///
    /// `filter.member` keeps one author's labels; `filter.perspective` keeps
    /// labels by annotators bound to that perspective.
    pub async fn annotations(
        pool: &PgPool,
        project_id: DbId,
        kind: LabelKind,
        filter: AnnotationFilter,
    ) -> Result<Vec<AnnotationRow>, sqlx::Error> {
        let offsets = match kind {
            LabelKind::Span => "l.start_offset, l.end_offset",
            LabelKind::Category | LabelKind::Relation => {
                "NULL::INTEGER AS start_offset, NULL::INTEGER AS end_offset"
            }
        };
        let query = format!(
            "SELECT l.id, l.example_id, l.user_id, u.username, lt.text AS label,
                    {offsets}, l.created_at
             FROM {table} l
             JOIN examples e ON e.id = l.example_id
             JOIN label_types lt ON lt.id = l.label_type_id
             JOIN users u ON u.id = l.user_id
             WHERE e.project_id = $1
               AND ($2::BIGINT IS NULL OR l.user_id = $2)
               AND ($3::BIGINT IS NULL OR l.user_id IN (
                   SELECT ap.annotator_id FROM annotator_perspectives ap
                   WHERE ap.perspective_id = $3))
             ORDER BY l.example_id, l.id",
            table = kind.table(),
        );
        sqlx::query_as::<_, AnnotationRow>(&query)
            .bind(project_id)
            .bind(filter.member)
            .bind(filter.perspective)
            .fetch_all(pool)
            .await
    }
}
