pub mod annotator_perspective;
pub mod auth;
pub mod example;
pub mod label;
pub mod label_type;
pub mod member;
pub mod metrics;
pub mod perspective;
pub mod project;
