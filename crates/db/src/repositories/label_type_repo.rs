//! Repository for the `label_types` table.

use annotate_core::label_kind::LabelKind;
use annotate_core::types::DbId;
use sqlx::PgPool;

use crate::models::label_type::{CreateLabelType, LabelType};

const COLUMNS: &str = "id, project_id, kind, text, prefix_key, suffix_key, \
                       background_color, text_color, created_at";

pub struct LabelTypeRepo;

impl LabelTypeRepo {
    /// Insert a label type. Colors fall back to the column defaults.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateLabelType,
    ) -> Result<LabelType, sqlx::Error> {
        let query = format!(
            "INSERT INTO label_types (project_id, kind, text, prefix_key, suffix_key,
                                      background_color, text_color)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, '#209cee'), COALESCE($7, '#ffffff'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LabelType>(&query)
            .bind(project_id)
            .bind(input.kind.as_str())
            .bind(&input.text)
            .bind(&input.prefix_key)
            .bind(&input.suffix_key)
            .bind(&input.background_color)
            .bind(&input.text_color)
            .fetch_one(pool)
            .await
    }

    /// List a project's label types, optionally of one kind, ordered by text.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        kind: Option<LabelKind>,
    ) -> Result<Vec<LabelType>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM label_types
             WHERE project_id = $1 AND ($2::TEXT IS NULL OR kind = $2)
             ORDER BY kind, text"
        );
        sqlx::query_as::<_, LabelType>(&query)
            .bind(project_id)
            .bind(kind.map(|k| k.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Label texts of one kind in a project, ordered by text.
    pub async fn texts(
        pool: &PgPool,
        project_id: DbId,
        kind: LabelKind,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT text FROM label_types WHERE project_id = $1 AND kind = $2 ORDER BY text",
        )
        .bind(project_id)
        .bind(kind.as_str())
        .fetch_all(pool)
        .await
    }

    pub async fn find_in_project(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<LabelType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM label_types WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, LabelType>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a label type and every label that uses it.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM label_types WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
