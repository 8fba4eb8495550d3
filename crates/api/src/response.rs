//! Shared response envelope types for API handlers.
//!
//! Collections are wrapped in a `{ "data": [...] }` envelope; single
//! entities and statistics objects are returned bare.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
