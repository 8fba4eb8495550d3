//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the requirement. Project-scoped extractors read `project_id` from the
//! matched path and look up the caller's membership in that project.
//! Superusers pass every check.

use std::collections::HashMap;

use annotate_core::error::CoreError;
use annotate_core::roles::{is_read_only_project_role, is_staff_role, ROLE_PROJECT_ADMIN};
use annotate_core::types::DbId;
use annotate_db::repositories::MemberRepo;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::http::Method;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `staff` or `superuser` system role. Rejects with 403 otherwise.
///
/// ```ignore
/// async fn staff_only(RequireStaff(user): RequireStaff) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_staff_role(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Staff role required".into(),
            )));
        }
        Ok(RequireStaff(user))
    }
}

/// Requires the caller to be a superuser or a `project_admin` of the
/// project named by the `{project_id}` path segment.
pub struct RequireProjectAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireProjectAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let access = ProjectAccess::resolve(parts, state).await?;
        if !access.is_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Project admin role required".into(),
            )));
        }
        Ok(RequireProjectAdmin(access.user))
    }
}

/// Project admin, or read-only staff.
///
/// Superusers and project admins pass for every method. Annotators and
/// annotation approvers pass only for safe methods (`GET`, `HEAD`, `OPTIONS`).
pub struct RequireProjectStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireProjectStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let access = ProjectAccess::resolve(parts, state).await?;
        let read_only = access.role.as_deref().is_some_and(is_read_only_project_role);
        if access.is_admin() || (read_only && is_safe_method(&parts.method)) {
            return Ok(RequireProjectStaff(access.user));
        }
        Err(AppError::Core(CoreError::Forbidden(
            "Project admin or read-only staff role required".into(),
        )))
    }
}

/// Any member of the path's project (or a superuser).
///
/// Carries the caller's project role so handlers can apply finer rules
/// such as "author or project admin".
pub struct RequireProjectMember(pub ProjectAccess);

impl FromRequestParts<AppState> for RequireProjectMember {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let access = ProjectAccess::resolve(parts, state).await?;
        if access.role.is_none() && !access.user.is_superuser() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Project membership required".into(),
            )));
        }
        Ok(RequireProjectMember(access))
    }
}

/// The caller together with their role in the path's project.
#[derive(Debug, Clone)]
pub struct ProjectAccess {
    pub user: AuthUser,
    pub project_id: DbId,
    /// `None` when the caller is not a member.
    pub role: Option<String>,
}

impl ProjectAccess {
    async fn resolve(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let project_id = project_id_from_path(parts, state).await?;
        let role = MemberRepo::find_role(&state.pool, project_id, user.user_id).await?;
        Ok(Self {
            user,
            project_id,
            role,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_superuser() || self.role.as_deref() == Some(ROLE_PROJECT_ADMIN)
    }
}

async fn project_id_from_path(parts: &mut Parts, state: &AppState) -> Result<DbId, AppError> {
    let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?;
    params
        .get("project_id")
        .ok_or_else(|| AppError::InternalError("Route has no {project_id} segment".into()))?
        .parse()
        .map_err(|_| AppError::BadRequest("project_id must be an integer".into()))
}

fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_read_methods_are_safe() {
        assert!(is_safe_method(&Method::GET));
        assert!(is_safe_method(&Method::HEAD));
        assert!(is_safe_method(&Method::OPTIONS));
        assert!(!is_safe_method(&Method::POST));
        assert!(!is_safe_method(&Method::PUT));
        assert!(!is_safe_method(&Method::PATCH));
        assert!(!is_safe_method(&Method::DELETE));
    }
}
