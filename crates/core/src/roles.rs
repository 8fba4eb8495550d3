//! Well-known role name constants.
//!
//! System roles travel in the JWT `role` claim. Project roles live in
//! `members.role` and must match the `ck_members_role` check constraint.

// System-level roles.
pub const ROLE_SUPERUSER: &str = "superuser";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_USER: &str = "user";

// Project-level roles.
pub const ROLE_PROJECT_ADMIN: &str = "project_admin";
pub const ROLE_ANNOTATOR: &str = "annotator";
pub const ROLE_ANNOTATION_APPROVER: &str = "annotation_approver";

/// All valid project role names.
pub const PROJECT_ROLES: &[&str] = &[
    ROLE_PROJECT_ADMIN,
    ROLE_ANNOTATOR,
    ROLE_ANNOTATION_APPROVER,
];

/// Map a user's account flags to the system role carried in their token.
pub fn system_role(is_superuser: bool, is_staff: bool) -> &'static str {
    if is_superuser {
        ROLE_SUPERUSER
    } else if is_staff {
        ROLE_STAFF
    } else {
        ROLE_USER
    }
}

/// Whether a system role may create and bulk-delete projects.
pub fn is_staff_role(role: &str) -> bool {
    role == ROLE_SUPERUSER || role == ROLE_STAFF
}

/// Whether a project role grants read-only access to project data.
pub fn is_read_only_project_role(role: &str) -> bool {
    role == ROLE_ANNOTATOR || role == ROLE_ANNOTATION_APPROVER
}
