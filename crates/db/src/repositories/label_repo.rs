//! Repository for the `categories`, `spans` and `relations` tables.
//!
//! Every method takes the [`LabelKind`] and picks the table and column set
//! from it; the kind-specific columns come back `NULL` for other kinds.

use annotate_core::label_kind::LabelKind;
use annotate_core::types::DbId;
use sqlx::PgPool;

use crate::models::label::{CreateLabel, Label};

fn columns(kind: LabelKind) -> &'static str {
    match kind {
        LabelKind::Category => {
            "id, example_id, user_id, label_type_id, \
             NULL::INTEGER AS start_offset, NULL::INTEGER AS end_offset, \
             NULL::BIGINT AS from_id, NULL::BIGINT AS to_id, created_at, updated_at"
        }
        LabelKind::Span => {
            "id, example_id, user_id, label_type_id, start_offset, end_offset, \
             NULL::BIGINT AS from_id, NULL::BIGINT AS to_id, created_at, updated_at"
        }
        LabelKind::Relation => {
            "id, example_id, user_id, label_type_id, \
             NULL::INTEGER AS start_offset, NULL::INTEGER AS end_offset, \
             from_id, to_id, created_at, updated_at"
        }
    }
}

pub struct LabelRepo;

impl LabelRepo {
    /// Insert a label authored by `user_id`.
    ///
    /// The caller validates that the kind-specific fields are present.
    pub async fn create(
        pool: &PgPool,
        kind: LabelKind,
        example_id: DbId,
        user_id: DbId,
        input: &CreateLabel,
    ) -> Result<Label, sqlx::Error> {
        let cols = columns(kind);
        let query = match kind {
            LabelKind::Category => format!(
                "INSERT INTO categories (example_id, user_id, label_type_id)
                 VALUES ($1, $2, $3)
                 RETURNING {cols}"
            ),
            LabelKind::Span => format!(
                "INSERT INTO spans (example_id, user_id, label_type_id, start_offset, end_offset)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING {cols}"
            ),
            LabelKind::Relation => format!(
                "INSERT INTO relations (example_id, user_id, label_type_id, from_id, to_id)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING {cols}"
            ),
        };

        let q = sqlx::query_as::<_, Label>(&query)
            .bind(example_id)
            .bind(user_id)
            .bind(input.label_type_id);
        let q = match kind {
            LabelKind::Category => q,
            LabelKind::Span => q.bind(input.start_offset).bind(input.end_offset),
            LabelKind::Relation => q.bind(input.from_id).bind(input.to_id),
        };
        q.fetch_one(pool).await
    }

    /// Labels on an example, optionally only those by `user_id`.
    pub async fn list(
        pool: &PgPool,
        kind: LabelKind,
        example_id: DbId,
        user_id: Option<DbId>,
    ) -> Result<Vec<Label>, sqlx::Error> {
        let query = format!(
            "SELECT {cols} FROM {table}
             WHERE example_id = $1 AND ($2::BIGINT IS NULL OR user_id = $2)
             ORDER BY id",
            cols = columns(kind),
            table = kind.table(),
        );
        sqlx::query_as::<_, Label>(&query)
            .bind(example_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        kind: LabelKind,
        example_id: DbId,
        id: DbId,
    ) -> Result<Option<Label>, sqlx::Error> {
        let query = format!(
            "SELECT {cols} FROM {table} WHERE id = $1 AND example_id = $2",
            cols = columns(kind),
            table = kind.table(),
        );
        sqlx::query_as::<_, Label>(&query)
            .bind(id)
            .bind(example_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(
        pool: &PgPool,
        kind: LabelKind,
        example_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "DELETE FROM {table} WHERE id = $1 AND example_id = $2",
            table = kind.table()
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(example_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `(start, end)` of every span `user_id` placed on an example.
    pub async fn span_offsets(
        pool: &PgPool,
        example_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<(i32, i32)>, sqlx::Error> {
        sqlx::query_as::<_, (i32, i32)>(
            "SELECT start_offset, end_offset FROM spans WHERE example_id = $1 AND user_id = $2",
        )
        .bind(example_id)
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// How many of `span_ids` are spans on `example_id`.
    pub async fn count_spans_on_example(
        pool: &PgPool,
        example_id: DbId,
        span_ids: &[DbId],
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM spans WHERE example_id = $1 AND id = ANY($2)",
        )
        .bind(example_id)
        .bind(span_ids)
        .fetch_one(pool)
        .await
    }
}
