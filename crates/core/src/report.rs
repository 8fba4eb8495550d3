//! Project annotations report.
//!
//! Lists every example with its span and category annotations, plus the
//! share of each label type among all annotations of that kind. Relation
//! labels are not part of this report; `/relation-distribution` covers them.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// One span or category annotation as shown in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportAnnotation {
    pub id: DbId,
    #[serde(skip)]
    pub example_id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_offset: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_offset: Option<i32>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportExample {
    pub id: DbId,
    pub text: String,
    pub spans: Vec<ReportAnnotation>,
    pub categories: Vec<ReportAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionEntry {
    pub label: String,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDistribution {
    pub spans: Vec<DistributionEntry>,
    pub categories: Vec<DistributionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationsReport {
    pub examples: Vec<ReportExample>,
    pub distribution: ReportDistribution,
}

/// `count / total * 100`, rounded to two decimals; `0` when `total == 0`.
pub fn percentage(count: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

/// Share of each label type among `annotations`.
///
/// Every label in `labels` gets an entry, in the given order, even when it
/// was never used.
pub fn kind_distribution(labels: &[String], annotations: &[ReportAnnotation]) -> Vec<DistributionEntry> {
    let total = annotations.len() as i64;
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for a in annotations {
        *counts.entry(a.label.as_str()).or_default() += 1;
    }

    labels
        .iter()
        .map(|label| {
            let count = counts.get(label.as_str()).copied().unwrap_or(0);
            DistributionEntry {
                label: label.clone(),
                count,
                percentage: percentage(count, total),
            }
        })
        .collect()
}

/// Assemble the full report.
///
/// `examples` are `(id, text)` pairs in display order. Annotations are
/// attached to their example by `example_id`; ones pointing at an example
/// not in the list are only counted in the distribution.
pub fn build_annotations_report(
    examples: Vec<(DbId, String)>,
    spans: Vec<ReportAnnotation>,
    categories: Vec<ReportAnnotation>,
    span_labels: &[String],
    category_labels: &[String],
) -> AnnotationsReport {
    let distribution = ReportDistribution {
        spans: kind_distribution(span_labels, &spans),
        categories: kind_distribution(category_labels, &categories),
    };

    let mut spans_by_example = group_by_example(spans);
    let mut categories_by_example = group_by_example(categories);

    let examples = examples
        .into_iter()
        .map(|(id, text)| ReportExample {
            id,
            text,
            spans: spans_by_example.remove(&id).unwrap_or_default(),
            categories: categories_by_example.remove(&id).unwrap_or_default(),
        })
        .collect();

    AnnotationsReport {
        examples,
        distribution,
    }
}

fn group_by_example(annotations: Vec<ReportAnnotation>) -> HashMap<DbId, Vec<ReportAnnotation>> {
    let mut grouped: HashMap<DbId, Vec<ReportAnnotation>> = HashMap::new();
    for a in annotations {
        grouped.entry(a.example_id).or_default().push(a);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotation(id: DbId, example_id: DbId, label: &str, span: Option<(i32, i32)>) -> ReportAnnotation {
        ReportAnnotation {
            id,
            example_id,
            user_id: 1,
            username: "alice".to_string(),
            label: label.to_string(),
            start_offset: span.map(|s| s.0),
            end_offset: span.map(|s| s.1),
            created_at: chrono::Utc::now(),
        }
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn percentage_rounds_to_two_decimals() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(3, 3), 100.0);
    }

    #[test]
    fn percentage_of_empty_total_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn distribution_sums_to_one_hundred() {
        let anns = vec![
            annotation(1, 1, "PER", Some((0, 3))),
            annotation(2, 1, "ORG", Some((4, 8))),
            annotation(3, 2, "PER", Some((0, 2))),
        ];
        let dist = kind_distribution(&labels(&["PER", "ORG", "LOC"]), &anns);

        let sum: f64 = dist.iter().map(|d| d.percentage).sum();
        assert!((sum - 100.0).abs() < 0.05, "sum was {sum}");
        assert_eq!(dist[2].label, "LOC");
        assert_eq!(dist[2].count, 0);
    }

    #[test]
    fn distribution_without_annotations_is_all_zero() {
        let dist = kind_distribution(&labels(&["PER", "ORG"]), &[]);
        assert!(dist.iter().all(|d| d.count == 0 && d.percentage == 0.0));
    }

    #[test]
    fn annotations_attach_to_their_example() {
        let report = build_annotations_report(
            vec![(1, "first".into()), (2, "second".into())],
            vec![annotation(10, 2, "PER", Some((0, 6)))],
            vec![annotation(20, 1, "positive", None)],
            &labels(&["PER"]),
            &labels(&["positive", "negative"]),
        );

        assert_eq!(report.examples.len(), 2);
        assert!(report.examples[0].spans.is_empty());
        assert_eq!(report.examples[0].categories[0].id, 20);
        assert_eq!(report.examples[1].spans[0].id, 10);
        assert_eq!(report.distribution.spans[0].percentage, 100.0);
        assert_eq!(report.distribution.categories[1].percentage, 0.0);
    }

    #[test]
    fn category_annotations_omit_offsets() {
        let json = serde_json::to_value(annotation(1, 1, "positive", None)).unwrap();
        assert!(json.get("start_offset").is_none());
        assert!(json.get("example_id").is_none());
        assert_eq!(json["label"], "positive");
    }
}
