//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where the
//!   entity is mutable

pub mod example;
pub mod label;
pub mod label_type;
pub mod member;
pub mod perspective;
pub mod project;
pub mod statistics;
pub mod user;
