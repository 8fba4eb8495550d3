//! Example (document) model, its confirmation state, and DTOs.

use annotate_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `examples` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Example {
    pub id: DbId,
    pub project_id: DbId,
    pub text: String,
    pub meta: serde_json::Value,
    pub upload_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an example.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExample {
    #[validate(length(min = 1))]
    pub text: String,
    pub meta: Option<serde_json::Value>,
    #[serde(default)]
    pub upload_name: String,
}

/// A row from the `example_states` table: `confirmed_by` marked the example done.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExampleState {
    pub id: DbId,
    pub example_id: DbId,
    pub confirmed_by: DbId,
    pub label_type_id: Option<DbId>,
    pub confirmed_at: Timestamp,
}

/// DTO for toggling the caller's confirmation of an example.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToggleExampleState {
    pub label_type_id: Option<DbId>,
}
