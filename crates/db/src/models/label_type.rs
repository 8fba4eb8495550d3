//! Label type model and DTOs.

use annotate_core::label_kind::LabelKind;
use annotate_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `label_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LabelType {
    pub id: DbId,
    pub project_id: DbId,
    pub kind: String,
    pub text: String,
    pub prefix_key: Option<String>,
    pub suffix_key: Option<String>,
    pub background_color: String,
    pub text_color: String,
    pub created_at: Timestamp,
}

/// DTO for creating a label type.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLabelType {
    pub kind: LabelKind,
    #[validate(length(min = 1, max = 100))]
    pub text: String,
    pub prefix_key: Option<String>,
    pub suffix_key: Option<String>,
    #[validate(length(equal = 7))]
    pub background_color: Option<String>,
    #[validate(length(equal = 7))]
    pub text_color: Option<String>,
}
