//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod annotator_perspective_repo;
pub mod example_repo;
pub mod example_state_repo;
pub mod label_repo;
pub mod label_type_repo;
pub mod member_repo;
pub mod perspective_repo;
pub mod project_repo;
pub mod statistics_repo;
pub mod user_repo;

pub use annotator_perspective_repo::AnnotatorPerspectiveRepo;
pub use example_repo::ExampleRepo;
pub use example_state_repo::ExampleStateRepo;
pub use label_repo::LabelRepo;
pub use label_type_repo::LabelTypeRepo;
pub use member_repo::MemberRepo;
pub use perspective_repo::PerspectiveRepo;
pub use project_repo::ProjectRepo;
pub use statistics_repo::StatisticsRepo;
pub use user_repo::UserRepo;
