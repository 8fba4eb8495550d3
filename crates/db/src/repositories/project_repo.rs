//! Repository for the `projects` table.

use annotate_core::roles::ROLE_PROJECT_ADMIN;
use annotate_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, guideline, project_type, random_order, \
                       collaborative_annotation, allow_overlapping_spans, created_by, \
                       created_at, updated_at";

/// [`COLUMNS`] qualified with the `p` alias for joined queries.
const P_COLUMNS: &str = "p.id, p.name, p.description, p.guideline, p.project_type, \
                         p.random_order, p.collaborative_annotation, p.allow_overlapping_spans, \
                         p.created_by, p.created_at, p.updated_at";

/// Provides CRUD, bulk-delete and clone operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project and make `creator_id` its project admin.
    ///
    /// Both rows are written in one transaction, so a project never exists
    /// without its creator's admin membership.
    pub async fn create_with_admin(
        pool: &PgPool,
        input: &CreateProject,
        creator_id: DbId,
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (name, description, guideline, project_type, random_order,
                                   collaborative_annotation, allow_overlapping_spans, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.guideline)
            .bind(input.project_type.as_str())
            .bind(input.random_order)
            .bind(input.collaborative_annotation)
            .bind(input.allow_overlapping_spans)
            .bind(creator_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO members (project_id, user_id, role) VALUES ($1, $2, $3)")
            .bind(project.id)
            .bind(creator_id)
            .bind(ROLE_PROJECT_ADMIN)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the projects `user_id` is a member of, newest first.
    ///
    /// `search` matches name or description, case-insensitively.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS}
             FROM projects p
             JOIN members m ON m.project_id = p.id
             WHERE m.user_id = $1
               AND ($2::TEXT IS NULL
                    OR p.name ILIKE '%' || $2 || '%'
                    OR p.description ILIKE '%' || $2 || '%')
             ORDER BY p.created_at DESC, p.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                guideline = COALESCE($4, guideline),
                random_order = COALESCE($5, random_order),
                collaborative_annotation = COALESCE($6, collaborative_annotation),
                allow_overlapping_spans = COALESCE($7, allow_overlapping_spans),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.guideline)
            .bind(input.random_order)
            .bind(input.collaborative_annotation)
            .bind(input.allow_overlapping_spans)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by ID. Examples, labels, members and perspectives
    /// go with it (`ON DELETE CASCADE`). Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Narrow `ids` to the projects on which `user_id` is project admin.
    pub async fn admin_project_ids(
        pool: &PgPool,
        user_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT p.id
             FROM projects p
             JOIN members m ON m.project_id = p.id
             WHERE m.user_id = $1 AND m.role = $2 AND p.id = ANY($3)
             ORDER BY p.id",
        )
        .bind(user_id)
        .bind(ROLE_PROJECT_ADMIN)
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    /// Deep-copy a project's configuration into a new project.
    ///
    /// Copies the project row, its members, tags, label types and
    /// perspectives. Examples, example states, labels and annotator
    /// bindings are not copied. `creator_id` becomes the clone's creator and
    /// a project admin of it. Runs in a single transaction.
    ///
    /// Returns `None` if the source project does not exist.
    pub async fn clone_project(
        pool: &PgPool,
        id: DbId,
        creator_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (name, description, guideline, project_type, random_order,
                                   collaborative_annotation, allow_overlapping_spans, created_by)
             SELECT name, description, guideline, project_type, random_order,
                    collaborative_annotation, allow_overlapping_spans, $2
             FROM projects WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(project) = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(creator_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO members (project_id, user_id, role)
             SELECT $2, user_id, role FROM members WHERE project_id = $1",
        )
        .bind(id)
        .bind(project.id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO members (project_id, user_id, role) VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_members_project_user
             DO UPDATE SET role = EXCLUDED.role",
        )
        .bind(project.id)
        .bind(creator_id)
        .bind(ROLE_PROJECT_ADMIN)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO tags (project_id, text)
             SELECT $2, text FROM tags WHERE project_id = $1",
        )
        .bind(id)
        .bind(project.id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO label_types (project_id, kind, text, prefix_key, suffix_key,
                                      background_color, text_color)
             SELECT $2, kind, text, prefix_key, suffix_key, background_color, text_color
             FROM label_types WHERE project_id = $1",
        )
        .bind(id)
        .bind(project.id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO perspectives (project_id, name, description, created_by)
             SELECT $2, name, description, created_by FROM perspectives WHERE project_id = $1",
        )
        .bind(id)
        .bind(project.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(project))
    }
}
