pub mod auth;
pub mod health;
pub mod perspective;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Every route is registered here at startup; nothing is registered
/// globally.
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/me                                         current user
///
/// /projects                                        list, create, bulk delete
/// /projects/{project_id}                           get, update, delete
/// /projects/{project_id}/clone                     deep copy (POST)
/// /projects/{project_id}/members                   list, add
/// /projects/{project_id}/members/{member_id}       remove
/// /projects/{project_id}/perspectives              list, create
/// /projects/{project_id}/perspectives/{id}         get, delete
/// /projects/{project_id}/label-types               list, create
/// /projects/{project_id}/label-types/{id}          delete
/// /projects/{project_id}/examples                  list, create
/// /projects/{project_id}/examples/{id}             get
/// /projects/{project_id}/examples/{id}/states      list, toggle confirmation
/// /projects/{project_id}/examples/{id}/{kind}      list, create labels
/// /projects/{project_id}/examples/{id}/{kind}/{label_id}  delete label
/// /projects/{project_id}/progress                  caller's progress
/// /projects/{project_id}/members-progress          per-member progress
/// /projects/{project_id}/category-distribution     label counts per member
/// /projects/{project_id}/span-distribution         label counts per member
/// /projects/{project_id}/relation-distribution     label counts per member
/// /projects/{project_id}/member-label-choices      chosen label per confirmed example
/// /projects/{project_id}/annotations-report        examples with annotations + shares
/// /projects/{project_id}/disagreement-report       pairwise annotator disagreement
/// /projects/{project_id}/annotator-report          per-annotator label breakdown
///
/// /perspectives/{perspective_id}/annotators        list, bind caller
/// /perspectives/{perspective_id}/annotators/{id}   get, update, unbind
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
        .nest("/perspectives", perspective::router())
}
