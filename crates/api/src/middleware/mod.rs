//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireStaff`] -- Requires the `staff` or `superuser` system role.
//! - [`rbac::RequireProjectAdmin`] -- Requires admin rights on the path's project.
//! - [`rbac::RequireProjectStaff`] -- Project admin, or read-only member on safe methods.
//! - [`rbac::RequireProjectMember`] -- Any member of the path's project.

pub mod auth;
pub mod rbac;
