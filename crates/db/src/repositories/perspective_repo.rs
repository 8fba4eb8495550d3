//! Repository for the `perspectives` table.

use annotate_core::types::DbId;
use sqlx::PgPool;

use crate::models::perspective::{CreatePerspective, Perspective};

const COLUMNS: &str = "id, project_id, name, description, created_by, created_at";

pub struct PerspectiveRepo;

impl PerspectiveRepo {
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        created_by: DbId,
        input: &CreatePerspective,
    ) -> Result<Perspective, sqlx::Error> {
        let query = format!(
            "INSERT INTO perspectives (project_id, name, description, created_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Perspective>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// A project's perspectives ordered by name.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Perspective>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM perspectives WHERE project_id = $1 ORDER BY name");
        sqlx::query_as::<_, Perspective>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Perspective>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM perspectives WHERE id = $1");
        sqlx::query_as::<_, Perspective>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_in_project(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Perspective>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM perspectives WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Perspective>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a perspective (and its annotator binding). Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM perspectives WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
