//! Project types.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Annotation task a project is set up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectType {
    DocumentClassification,
    SequenceLabeling,
    Seq2seq,
    IntentDetectionAndSlotFilling,
    ImageClassification,
    Speech2text,
}

const VALID_TYPE_STRINGS: &[&str] = &[
    "DocumentClassification",
    "SequenceLabeling",
    "Seq2seq",
    "IntentDetectionAndSlotFilling",
    "ImageClassification",
    "Speech2text",
];

impl ProjectType {
    /// Value stored in `projects.project_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentClassification => "DocumentClassification",
            Self::SequenceLabeling => "SequenceLabeling",
            Self::Seq2seq => "Seq2seq",
            Self::IntentDetectionAndSlotFilling => "IntentDetectionAndSlotFilling",
            Self::ImageClassification => "ImageClassification",
            Self::Speech2text => "Speech2text",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "DocumentClassification" => Ok(Self::DocumentClassification),
            "SequenceLabeling" => Ok(Self::SequenceLabeling),
            "Seq2seq" => Ok(Self::Seq2seq),
            "IntentDetectionAndSlotFilling" => Ok(Self::IntentDetectionAndSlotFilling),
            "ImageClassification" => Ok(Self::ImageClassification),
            "Speech2text" => Ok(Self::Speech2text),
            _ => Err(CoreError::Validation(format!(
                "Invalid project type '{s}'. Must be one of: {}",
                VALID_TYPE_STRINGS.join(", ")
            ))),
        }
    }
}

/// Maximum length of a project name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Reject blank or over-long project names.
pub fn validate_project_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Project name must not be blank".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Project name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}
