//! Shared query parameter types for API handlers.

use annotate_core::types::DbId;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the handler via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Project listing parameters (`?search=&limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct ProjectListParams {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Label-type listing filter (`?kind=category|span|relation`).
#[derive(Debug, Deserialize)]
pub struct KindParams {
    pub kind: Option<String>,
}

/// Distribution filter narrowing the count to one example (`?example=`).
#[derive(Debug, Deserialize)]
pub struct ExampleFilterParams {
    pub example: Option<DbId>,
}

/// Report filters (`?member=&perspective=`): one author's labels, or those
/// of the annotators bound to a perspective.
#[derive(Debug, Deserialize)]
pub struct ReportFilterParams {
    pub member: Option<DbId>,
    pub perspective: Option<DbId>,
}
