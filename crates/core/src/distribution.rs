//! Label distribution: how often each member applied each label type.
//!
//! The same shape serves category, span and relation labels; the caller
//! picks the label table by [`LabelKind`](crate::label_kind::LabelKind) and
//! hands the grouped counts in here.

use std::collections::BTreeMap;

use crate::types::DbId;

/// `label text -> username -> count`.
pub type LabelDistribution = BTreeMap<String, BTreeMap<String, i64>>;

/// One grouped row: `count` labels of type `label` authored by `username`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub username: String,
    pub count: i64,
}

/// Build a zero-filled distribution.
///
/// Every label in `labels` and every member in `usernames` appears in the
/// output, with `0` where no row was counted. Rows for labels or users
/// outside those sets (e.g. a former member) are not reported.
pub fn label_distribution(
    labels: &[String],
    usernames: &[String],
    rows: &[LabelCount],
) -> LabelDistribution {
    let mut distribution: LabelDistribution = labels
        .iter()
        .map(|label| {
            let per_user = usernames.iter().map(|u| (u.clone(), 0)).collect();
            (label.clone(), per_user)
        })
        .collect();

    for row in rows {
        if let Some(cell) = distribution
            .get_mut(&row.label)
            .and_then(|per_user| per_user.get_mut(&row.username))
        {
            *cell += row.count;
        }
    }

    distribution
}

/// Label shown for a confirmed example with no chosen label.
pub const NO_LABEL: &str = "No label";

/// `username -> example id -> chosen label text`.
pub type LabelChoices = BTreeMap<String, BTreeMap<String, String>>;

/// One confirmed example state: `username` confirmed `example_id`, choosing
/// `label` (if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelChoice {
    pub username: String,
    pub example_id: DbId,
    pub label: Option<String>,
}

/// Group confirmed states per member.
///
/// Every member in `usernames` appears, with an empty map when they have
/// confirmed nothing. Example ids become string keys for JSON output.
pub fn member_label_choices(usernames: &[String], rows: &[LabelChoice]) -> LabelChoices {
    let mut choices: LabelChoices = usernames
        .iter()
        .map(|u| (u.clone(), BTreeMap::new()))
        .collect();

    for row in rows {
        if let Some(per_example) = choices.get_mut(&row.username) {
            let label = row.label.clone().unwrap_or_else(|| NO_LABEL.to_string());
            per_example.insert(row.example_id.to_string(), label);
        }
    }

    choices
}
