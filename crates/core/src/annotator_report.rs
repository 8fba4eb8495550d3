//! Per-annotator label breakdown.
//!
//! Every project member gets one summary, even with no annotations. Labels
//! keep the order in which they first appear in the input, which the
//! repository sorts by example then annotation id.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::disagreement::ComparableAnnotation;
use crate::progress::MemberRef;
use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatorReport {
    pub items: Vec<AnnotatorSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatorSummary {
    pub annotator: String,
    pub total: i64,
    /// Distinct labels used by the annotator, joined with `", "`.
    pub categories: String,
    pub datasets: Vec<DocumentBreakdown>,
}

/// Label counts of one annotator on one example.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentBreakdown {
    pub document: DbId,
    pub categories: Vec<CategoryShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub count: i64,
    /// Share of the annotator's labels on this example, one decimal.
    pub percentage: f64,
}

/// Build the report for `members`, in the given order.
pub fn annotator_report(
    members: &[MemberRef],
    annotations: &[ComparableAnnotation],
) -> AnnotatorReport {
    let items = members
        .iter()
        .map(|member| {
            let own: Vec<&ComparableAnnotation> = annotations
                .iter()
                .filter(|a| a.user_id == member.user_id)
                .collect();
            summarize(&member.username, &own)
        })
        .collect();
    AnnotatorReport { items }
}

fn summarize(username: &str, annotations: &[&ComparableAnnotation]) -> AnnotatorSummary {
    let mut by_example: BTreeMap<DbId, Vec<&ComparableAnnotation>> = BTreeMap::new();
    for a in annotations {
        by_example.entry(a.example_id).or_default().push(*a);
    }

    let datasets = by_example
        .into_iter()
        .map(|(document, anns)| {
            let total = anns.len() as i64;
            let categories = count_in_order(&anns)
                .into_iter()
                .map(|(name, count)| CategoryShare {
                    name,
                    count,
                    percentage: one_decimal_share(count, total),
                })
                .collect();
            DocumentBreakdown {
                document,
                categories,
            }
        })
        .collect();

    let labels: Vec<String> = count_in_order(annotations)
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    AnnotatorSummary {
        annotator: username.to_string(),
        total: annotations.len() as i64,
        categories: labels.join(", "),
        datasets,
    }
}

/// `(label, count)` pairs in first-seen order.
fn count_in_order(annotations: &[&ComparableAnnotation]) -> Vec<(String, i64)> {
    let mut counts: Vec<(String, i64)> = Vec::new();
    for a in annotations {
        match counts.iter_mut().find(|(label, _)| *label == a.label) {
            Some((_, count)) => *count += 1,
            None => counts.push((a.label.clone(), 1)),
        }
    }
    counts
}

fn one_decimal_share(count: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(user_id: DbId, username: &str) -> MemberRef {
        MemberRef {
            user_id,
            username: username.to_string(),
        }
    }

    fn ann(example_id: DbId, user_id: DbId, label: &str) -> ComparableAnnotation {
        ComparableAnnotation {
            example_id,
            user_id,
            username: format!("user{user_id}"),
            label: label.to_string(),
            start_offset: None,
            end_offset: None,
        }
    }

    #[test]
    fn member_without_annotations_is_listed_with_zero_total() {
        let members = [member(1, "alice"), member(2, "bob")];
        let report = annotator_report(&members, &[ann(10, 1, "PER")]);

        assert_eq!(report.items.len(), 2);
        let bob = &report.items[1];
        assert_eq!(bob.annotator, "bob");
        assert_eq!(bob.total, 0);
        assert_eq!(bob.categories, "");
        assert!(bob.datasets.is_empty());
    }

    #[test]
    fn labels_are_joined_in_first_seen_order() {
        let anns = vec![
            ann(10, 1, "PER"),
            ann(10, 1, "ORG"),
            ann(11, 1, "PER"),
            ann(11, 1, "LOC"),
        ];
        let report = annotator_report(&[member(1, "alice")], &anns);

        assert_eq!(report.items[0].total, 4);
        assert_eq!(report.items[0].categories, "PER, ORG, LOC");
    }

    #[test]
    fn shares_are_per_document_with_one_decimal() {
        let anns = vec![
            ann(11, 1, "PER"),
            ann(10, 1, "PER"),
            ann(10, 1, "PER"),
            ann(10, 1, "ORG"),
        ];
        let report = annotator_report(&[member(1, "alice")], &anns);
        let datasets = &report.items[0].datasets;

        assert_eq!(datasets.len(), 2);
        assert_eq!(datasets[0].document, 10);
        assert_eq!(
            datasets[0].categories,
            vec![
                CategoryShare {
                    name: "PER".to_string(),
                    count: 2,
                    percentage: 66.7,
                },
                CategoryShare {
                    name: "ORG".to_string(),
                    count: 1,
                    percentage: 33.3,
                },
            ]
        );
        assert_eq!(datasets[1].document, 11);
        assert_eq!(datasets[1].categories[0].percentage, 100.0);
    }

    #[test]
    fn annotations_of_non_members_are_ignored() {
        let report = annotator_report(&[member(1, "alice")], &[ann(10, 9, "PER")]);
        assert_eq!(report.items[0].total, 0);
    }

    #[test]
    fn serializes_with_dataset_keys() {
        let report = annotator_report(&[member(1, "alice")], &[ann(10, 1, "PER")]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "items": [{
                    "annotator": "alice",
                    "total": 1,
                    "categories": "PER",
                    "datasets": [{
                        "document": 10,
                        "categories": [{ "name": "PER", "count": 1, "percentage": 100.0 }],
                    }],
                }]
            })
        );
    }
}
