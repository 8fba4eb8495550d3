//! Perspective and annotator-binding models.

use annotate_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `perspectives` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Perspective {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: String,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for creating a perspective.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePerspective {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A row from the `annotator_perspectives` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnnotatorPerspective {
    pub id: DbId,
    pub perspective_id: DbId,
    pub annotator_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for moving a binding to another annotator and/or perspective.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAnnotatorPerspective {
    pub annotator_id: Option<DbId>,
    pub perspective_id: Option<DbId>,
}

/// Result of a binding write.
#[derive(Debug)]
pub enum BindOutcome {
    Bound(AnnotatorPerspective),
    /// The target perspective (or the binding being updated) does not exist.
    NotFound,
    /// The target perspective already has another annotator.
    AlreadyBound,
}
