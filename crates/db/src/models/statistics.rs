//! Row shapes returned by the aggregation queries in
//! [`StatisticsRepo`](crate::repositories::StatisticsRepo).

use annotate_core::disagreement::ComparableAnnotation;
use annotate_core::distribution::{LabelChoice, LabelCount};
use annotate_core::report::ReportAnnotation;
use annotate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Distinct examples confirmed by one user.
#[derive(Debug, Clone, FromRow)]
pub struct DoneCountRow {
    pub user_id: DbId,
    pub done: i64,
}

/// Labels of one type authored by one user.
#[derive(Debug, Clone, FromRow)]
pub struct LabelCountRow {
    pub label: String,
    pub username: String,
    pub count: i64,
}

impl From<LabelCountRow> for LabelCount {
    fn from(row: LabelCountRow) -> Self {
        Self {
            label: row.label,
            username: row.username,
            count: row.count,
        }
    }
}

/// A member's confirmation of an example, with the label chosen (if any).
#[derive(Debug, Clone, FromRow)]
pub struct MemberChoiceRow {
    pub username: String,
    pub example_id: DbId,
    pub label: Option<String>,
}

impl From<MemberChoiceRow> for LabelChoice {
    fn from(row: MemberChoiceRow) -> Self {
        Self {
            username: row.username,
            example_id: row.example_id,
            label: row.label,
        }
    }
}

/// Narrows [`StatisticsRepo::annotations`](crate::repositories::StatisticsRepo::annotations)
/// to one author, or to the annotators bound to one perspective.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationFilter {
    pub member: Option<DbId>,
    pub perspective: Option<DbId>,
}

/// A span or category annotation joined with its author and label text.
#[derive(Debug, Clone, FromRow)]
pub struct AnnotationRow {
    pub id: DbId,
    pub example_id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub label: String,
    pub start_offset: Option<i32>,
    pub end_offset: Option<i32>,
    pub created_at: Timestamp,
}

impl From<AnnotationRow> for ReportAnnotation {
    fn from(row: AnnotationRow) -> Self {
        Self {
            id: row.id,
            example_id: row.example_id,
            user_id: row.user_id,
            username: row.username,
            label: row.label,
            start_offset: row.start_offset,
            end_offset: row.end_offset,
            created_at: row.created_at,
        }
    }
}

impl From<AnnotationRow> for ComparableAnnotation {
    fn from(row: AnnotationRow) -> Self {
        Self {
            example_id: row.example_id,
            user_id: row.user_id,
            username: row.username,
            label: row.label,
            start_offset: row.start_offset,
            end_offset: row.end_offset,
        }
    }
}
