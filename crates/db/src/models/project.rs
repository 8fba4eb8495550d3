//! Project entity model and DTOs.

use annotate_core::project::ProjectType;
use annotate_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub guideline: String,
    pub project_type: String,
    pub random_order: bool,
    pub collaborative_annotation: bool,
    pub allow_overlapping_spans: bool,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub guideline: String,
    pub project_type: ProjectType,
    #[serde(default)]
    pub random_order: bool,
    #[serde(default)]
    pub collaborative_annotation: bool,
    #[serde(default)]
    pub allow_overlapping_spans: bool,
}

/// DTO for updating an existing project. All fields are optional.
///
/// The project type is fixed at creation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub guideline: Option<String>,
    pub random_order: Option<bool>,
    pub collaborative_annotation: Option<bool>,
    pub allow_overlapping_spans: Option<bool>,
}
