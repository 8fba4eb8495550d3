//! Span offset validation.

use crate::error::CoreError;

/// Validate `start..end` against a text of `text_len` characters.
pub fn validate_offsets(start: i32, end: i32, text_len: usize) -> Result<(), CoreError> {
    if start < 0 {
        return Err(CoreError::Validation(format!(
            "start_offset must be non-negative, got {start}"
        )));
    }
    if start >= end {
        return Err(CoreError::Validation(format!(
            "start_offset ({start}) must be less than end_offset ({end})"
        )));
    }
    if end as usize > text_len {
        return Err(CoreError::Validation(format!(
            "end_offset ({end}) exceeds text length ({text_len})"
        )));
    }
    Ok(())
}

/// Whether two half-open ranges share at least one character.
pub fn overlaps(a: (i32, i32), b: (i32, i32)) -> bool {
    a.0 < b.1 && b.0 < a.1
}
