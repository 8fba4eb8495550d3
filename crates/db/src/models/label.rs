//! Label instances (categories, spans, relations).
//!
//! The three label tables differ in shape; [`Label`] is the union of their
//! columns, with the kind-specific ones `NULL` where they do not apply.

use annotate_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Label {
    pub id: DbId,
    pub example_id: DbId,
    pub user_id: DbId,
    pub label_type_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_offset: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_offset: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a label. Which optional fields are required depends on
/// the label kind: spans need offsets, relations need `from_id` / `to_id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLabel {
    pub label_type_id: DbId,
    pub start_offset: Option<i32>,
    pub end_offset: Option<i32>,
    pub from_id: Option<DbId>,
    pub to_id: Option<DbId>,
}
