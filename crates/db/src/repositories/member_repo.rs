//! Repository for the `members` table.

use annotate_core::types::DbId;
use sqlx::PgPool;

use crate::models::member::{CreateMember, Member};

/// Member columns joined with the user's name (`m` = members, `u` = users).
const COLUMNS: &str = "m.id, m.project_id, m.user_id, u.username, m.role, m.created_at";

/// Provides membership operations for projects.
pub struct MemberRepo;

impl MemberRepo {
    /// Add a user to a project with the given role.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateMember,
    ) -> Result<Member, sqlx::Error> {
        let query = format!(
            "WITH m AS (
                 INSERT INTO members (project_id, user_id, role)
                 VALUES ($1, $2, $3)
                 RETURNING *
             )
             SELECT {COLUMNS} FROM m JOIN users u ON u.id = m.user_id"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(project_id)
            .bind(input.user_id)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// List a project's members ordered by username.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Member>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM members m JOIN users u ON u.id = m.user_id
             WHERE m.project_id = $1
             ORDER BY u.username"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// The role `user_id` holds in `project_id`, if they are a member.
    pub async fn find_role(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT role FROM members WHERE project_id = $1 AND user_id = $2",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Remove a member from a project. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
