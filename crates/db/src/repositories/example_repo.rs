//! Repository for the `examples` table.

use annotate_core::types::DbId;
use sqlx::PgPool;

use crate::models::example::{CreateExample, Example};

const COLUMNS: &str = "id, project_id, text, meta, upload_name, created_at, updated_at";

pub struct ExampleRepo;

impl ExampleRepo {
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateExample,
    ) -> Result<Example, sqlx::Error> {
        let query = format!(
            "INSERT INTO examples (project_id, text, meta, upload_name)
             VALUES ($1, $2, COALESCE($3, '{{}}'::jsonb), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Example>(&query)
            .bind(project_id)
            .bind(&input.text)
            .bind(&input.meta)
            .bind(&input.upload_name)
            .fetch_one(pool)
            .await
    }

    /// Find an example, scoped to the project it must belong to.
    pub async fn find_in_project(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Example>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM examples WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Example>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Page through a project's examples in insertion order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Example>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM examples WHERE project_id = $1
             ORDER BY id LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Example>(&query)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Every example in a project as `(id, text)`, in insertion order.
    pub async fn list_texts(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<(DbId, String)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, String)>(
            "SELECT id, text FROM examples WHERE project_id = $1 ORDER BY id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    pub async fn count_by_project(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM examples WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(pool)
            .await
    }

    /// Whether the project has at least one example.
    pub async fn exists_in_project(pool: &PgPool, project_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM examples WHERE project_id = $1)",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await
    }
}
