//! Domain logic for the annotation backend.
//!
//! Everything in this crate is pure: no database access, no HTTP. The
//! repository layer (`annotate_db`) feeds rows in, the API layer
//! (`annotate_api`) serializes what comes out.

pub mod annotator_report;
pub mod disagreement;
pub mod distribution;
pub mod error;
pub mod label_kind;
pub mod perspective;
pub mod progress;
pub mod project;
pub mod report;
pub mod roles;
pub mod search;
pub mod span;
pub mod types;
