//! Pairwise annotator disagreement per example.
//!
//! For every example and every pair of annotators who both labelled it, the
//! disagreement rate is the fraction of the first annotator's annotations
//! that the second annotator has no exact match for.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::types::DbId;

/// An annotation reduced to the fields that decide agreement.
///
/// Category annotations carry no offsets, so they match on label alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparableAnnotation {
    pub example_id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub label: String,
    pub start_offset: Option<i32>,
    pub end_offset: Option<i32>,
}

impl ComparableAnnotation {
    fn matches(&self, other: &Self) -> bool {
        self.label == other.label
            && self.start_offset == other.start_offset
            && self.end_offset == other.end_offset
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisagreementItem {
    pub example_id: DbId,
    pub annotator1: String,
    pub annotator2: String,
    pub disagreement_rate: f64,
    pub disagreement_labels: Vec<String>,
}

/// Compute disagreement items, ordered by example id then annotator pair
/// (pairs ordered by user id).
pub fn disagreement_items(annotations: &[ComparableAnnotation]) -> Vec<DisagreementItem> {
    // example -> user id -> annotations
    let mut by_example: BTreeMap<DbId, BTreeMap<DbId, Vec<&ComparableAnnotation>>> =
        BTreeMap::new();
    for a in annotations {
        by_example
            .entry(a.example_id)
            .or_default()
            .entry(a.user_id)
            .or_default()
            .push(a);
    }

    let mut items = Vec::new();
    for (example_id, by_user) in &by_example {
        let annotators: Vec<&Vec<&ComparableAnnotation>> = by_user.values().collect();
        for (i, first) in annotators.iter().enumerate() {
            for second in &annotators[i + 1..] {
                items.push(compare_pair(*example_id, first, second));
            }
        }
    }
    items
}

fn compare_pair(
    example_id: DbId,
    first: &[&ComparableAnnotation],
    second: &[&ComparableAnnotation],
) -> DisagreementItem {
    let unmatched: Vec<&ComparableAnnotation> = first
        .iter()
        .filter(|a| !second.iter().any(|b| a.matches(b)))
        .copied()
        .collect();

    let denominator = first.len().max(1) as f64;
    let rate = unmatched.len() as f64 / denominator;

    let labels: BTreeSet<String> = unmatched.iter().map(|a| a.label.clone()).collect();

    DisagreementItem {
        example_id,
        annotator1: first[0].username.clone(),
        annotator2: second[0].username.clone(),
        disagreement_rate: (rate * 10_000.0).round() / 10_000.0,
        disagreement_labels: labels.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(example_id: DbId, user_id: DbId, label: &str, start: i32, end: i32) -> ComparableAnnotation {
        ComparableAnnotation {
            example_id,
            user_id,
            username: format!("user{user_id}"),
            label: label.to_string(),
            start_offset: Some(start),
            end_offset: Some(end),
        }
    }

    #[test]
    fn identical_annotations_agree() {
        let anns = vec![span(1, 1, "PER", 0, 4), span(1, 2, "PER", 0, 4)];
        let items = disagreement_items(&anns);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].disagreement_rate, 0.0);
        assert!(items[0].disagreement_labels.is_empty());
    }

    #[test]
    fn offset_mismatch_counts_as_disagreement() {
        let anns = vec![
            span(1, 1, "PER", 0, 4),
            span(1, 1, "ORG", 5, 9),
            span(1, 2, "PER", 0, 4),
            span(1, 2, "ORG", 5, 8),
        ];
        let items = disagreement_items(&anns);
        assert_eq!(items[0].disagreement_rate, 0.5);
        assert_eq!(items[0].disagreement_labels, vec!["ORG".to_string()]);
        assert_eq!(items[0].annotator1, "user1");
        assert_eq!(items[0].annotator2, "user2");
    }

    #[test]
    fn single_annotator_examples_produce_no_pairs() {
        let anns = vec![span(1, 1, "PER", 0, 4), span(2, 2, "PER", 0, 4)];
        assert!(disagreement_items(&anns).is_empty());
    }

    #[test]
    fn three_annotators_yield_three_pairs() {
        let anns = vec![span(1, 3, "A", 0, 1), span(1, 1, "A", 0, 1), span(1, 2, "B", 0, 1)];
        let items = disagreement_items(&anns);
        let pairs: Vec<(&str, &str)> = items
            .iter()
            .map(|i| (i.annotator1.as_str(), i.annotator2.as_str()))
            .collect();
        assert_eq!(pairs, vec![("user1", "user2"), ("user1", "user3"), ("user2", "user3")]);
    }

    #[test]
    fn rate_is_rounded_to_four_places() {
        let anns = vec![
            span(1, 1, "A", 0, 1),
            span(1, 1, "B", 1, 2),
            span(1, 1, "C", 2, 3),
            span(1, 2, "A", 0, 1),
        ];
        assert_eq!(disagreement_items(&anns)[0].disagreement_rate, 0.6667);
    }
}
