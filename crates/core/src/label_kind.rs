//! The three kinds of label a project can carry.
//!
//! Category, span and relation labels share one `label_types` table (keyed
//! by `kind`) but live in separate label tables because their shapes differ.
//! Everything that aggregates over labels dispatches on [`LabelKind`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    Category,
    Span,
    Relation,
}

const VALID_KIND_STRINGS: &[&str] = &["category", "span", "relation"];

impl LabelKind {
    pub const ALL: [LabelKind; 3] = [LabelKind::Category, LabelKind::Span, LabelKind::Relation];

    /// Value stored in `label_types.kind`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Span => "span",
            Self::Relation => "relation",
        }
    }

    /// Parse a kind from its stored string form.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "category" => Ok(Self::Category),
            "span" => Ok(Self::Span),
            "relation" => Ok(Self::Relation),
            _ => Err(CoreError::Validation(format!(
                "Invalid label kind '{s}'. Must be one of: {}",
                VALID_KIND_STRINGS.join(", ")
            ))),
        }
    }

    /// Parse the plural URL segment used by the label routes
    /// (`categories`, `spans`, `relations`).
    pub fn from_path_segment(s: &str) -> Result<Self, CoreError> {
        match s {
            "categories" => Ok(Self::Category),
            "spans" => Ok(Self::Span),
            "relations" => Ok(Self::Relation),
            _ => Err(CoreError::Validation(format!(
                "Unknown label collection '{s}'. Must be one of: categories, spans, relations"
            ))),
        }
    }

    /// Table holding label instances of this kind.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Span => "spans",
            Self::Relation => "relations",
        }
    }
}

impl std::fmt::Display for LabelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
