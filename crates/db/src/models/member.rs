//! Project membership model and DTOs.

use annotate_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `members` table joined with the member's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for adding a user to a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMember {
    pub user_id: DbId,
    pub role: String,
}
