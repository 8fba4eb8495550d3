//! Perspective-to-annotator binding rules.
//!
//! A perspective is either unassigned or bound to exactly one annotator.
//! The repository checks this inside a transaction that locks the
//! perspective row, and the `uq_annotator_perspectives_perspective` index
//! backs it at the storage level.

use crate::error::CoreError;
use crate::types::DbId;

/// Ensure `perspective_id` can take a (new or moved) binding.
///
/// `existing` holds the binding ids currently attached to the perspective.
/// When `updating` is the id of the binding being written, that row does
/// not count against the rule, so re-saving a binding in place succeeds.
pub fn ensure_unbound(
    perspective_id: DbId,
    existing: &[DbId],
    updating: Option<DbId>,
) -> Result<(), CoreError> {
    let taken = existing.iter().any(|&id| Some(id) != updating);
    if taken {
        return Err(already_bound(perspective_id));
    }
    Ok(())
}

/// The error reported when a perspective already has an annotator.
pub fn already_bound(perspective_id: DbId) -> CoreError {
    CoreError::Validation(format!(
        "Perspective {perspective_id} is already bound to another annotator"
    ))
}
