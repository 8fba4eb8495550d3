//! Annotation progress arithmetic.
//!
//! The repository layer counts examples and confirmed example states; this
//! module turns those counts into the `{total, complete, remaining}` triple
//! served by the progress endpoints.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::DbId;

/// Completion counts for a set of examples.
///
/// Invariant: `total == complete + remaining` and no field is negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total: i64,
    pub complete: i64,
    pub remaining: i64,
}

impl Progress {
    /// Build a progress triple. `complete` is clamped into `0..=total`.
    pub fn new(total: i64, complete: i64) -> Self {
        let total = total.max(0);
        let complete = complete.clamp(0, total);
        Self {
            total,
            complete,
            remaining: total - complete,
        }
    }
}

/// A project member as seen by the progress report.
#[derive(Debug, Clone)]
pub struct MemberRef {
    pub user_id: DbId,
    pub username: String,
}

/// Progress for one project member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberProgress {
    pub user_id: DbId,
    pub username: String,
    #[serde(flatten)]
    pub progress: Progress,
}

/// Per-member progress for a whole project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MembersProgressReport {
    pub total: i64,
    pub progress: Vec<MemberProgress>,
}

/// Decompose project progress per member.
///
/// `done_counts` maps a user id to the number of distinct examples that user
/// has confirmed. Members missing from the map have confirmed nothing. When
/// `collaborative_done` is set, every member reports that shared count
/// instead of their own.
///
/// Entries are ordered by username so the output is stable.
pub fn member_progress(
    total: i64,
    members: &[MemberRef],
    done_counts: &HashMap<DbId, i64>,
    collaborative_done: Option<i64>,
) -> MembersProgressReport {
    let mut progress: Vec<MemberProgress> = members
        .iter()
        .map(|m| {
            let done = collaborative_done
                .or_else(|| done_counts.get(&m.user_id).copied())
                .unwrap_or(0);
            MemberProgress {
                user_id: m.user_id,
                username: m.username.clone(),
                progress: Progress::new(total, done),
            }
        })
        .collect();
    progress.sort_by(|a, b| a.username.cmp(&b.username));

    MembersProgressReport {
        total: total.max(0),
        progress,
    }
}
