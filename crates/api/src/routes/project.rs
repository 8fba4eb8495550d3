//! Route definitions for the `/projects` resource and everything nested
//! under `/projects/{project_id}/...`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{example, label, label_type, member, metrics, perspective, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                               -> list
/// POST   /                                               -> create
/// DELETE /                                               -> bulk_delete
/// GET    /{project_id}                                   -> get_by_id
/// PUT    /{project_id}                                   -> update
/// PATCH  /{project_id}                                   -> update
/// DELETE /{project_id}                                   -> delete
/// POST   /{project_id}/clone                             -> clone
///
/// GET    /{project_id}/members                           -> member::list
/// POST   /{project_id}/members                           -> member::create
/// DELETE /{project_id}/members/{member_id}               -> member::delete
///
/// GET    /{project_id}/perspectives                      -> perspective::list
/// POST   /{project_id}/perspectives                      -> perspective::create
/// GET    /{project_id}/perspectives/{perspective_id}     -> perspective::get_by_id
/// DELETE /{project_id}/perspectives/{perspective_id}     -> perspective::delete
///
/// GET    /{project_id}/label-types                       -> label_type::list
/// POST   /{project_id}/label-types                       -> label_type::create
/// DELETE /{project_id}/label-types/{id}                  -> label_type::delete
///
/// GET    /{project_id}/examples                          -> example::list
/// POST   /{project_id}/examples                          -> example::create
/// GET    /{project_id}/examples/{example_id}             -> example::get_by_id
/// GET    /{project_id}/examples/{example_id}/states      -> example::list_states
/// POST   /{project_id}/examples/{example_id}/states      -> example::toggle_state
/// GET    /{project_id}/examples/{example_id}/{kind}      -> label::list
/// POST   /{project_id}/examples/{example_id}/{kind}      -> label::create
/// DELETE /{project_id}/examples/{example_id}/{kind}/{label_id} -> label::delete
///
/// GET    /{project_id}/progress                          -> metrics::progress
/// GET    /{project_id}/members-progress                  -> metrics::members_progress
/// GET    /{project_id}/category-distribution             -> metrics::category_distribution
/// GET    /{project_id}/span-distribution                 -> metrics::span_distribution
/// GET    /{project_id}/relation-distribution             -> metrics::relation_distribution
/// GET    /{project_id}/member-label-choices              -> metrics::member_label_choices
/// GET    /{project_id}/annotations-report                -> metrics::annotations_report
/// GET    /{project_id}/disagreement-report               -> metrics::disagreement_report
/// GET    /{project_id}/annotator-report                  -> metrics::annotator_report
/// ```
pub fn router() -> Router<AppState> {
    let member_routes = Router::new()
        .route("/", get(member::list).post(member::create))
        .route("/{member_id}", delete(member::delete));

    let perspective_routes = Router::new()
        .route("/", get(perspective::list).post(perspective::create))
        .route(
            "/{perspective_id}",
            get(perspective::get_by_id).delete(perspective::delete),
        );

    let label_type_routes = Router::new()
        .route("/", get(label_type::list).post(label_type::create))
        .route("/{id}", delete(label_type::delete));

    let example_routes = Router::new()
        .route("/", get(example::list).post(example::create))
        .route("/{example_id}", get(example::get_by_id))
        .route(
            "/{example_id}/states",
            get(example::list_states).post(example::toggle_state),
        )
        .route("/{example_id}/{kind}", get(label::list).post(label::create))
        .route(
            "/{example_id}/{kind}/{label_id}",
            delete(label::delete),
        );

    Router::new()
        .route(
            "/",
            get(project::list)
                .post(project::create)
                .delete(project::bulk_delete),
        )
        .route(
            "/{project_id}",
            get(project::get_by_id)
                .put(project::update)
                .patch(project::update)
                .delete(project::delete),
        )
        .route("/{project_id}/clone", post(project::clone))
        .route("/{project_id}/progress", get(metrics::progress))
        .route(
            "/{project_id}/members-progress",
            get(metrics::members_progress),
        )
        .route(
            "/{project_id}/category-distribution",
            get(metrics::category_distribution),
        )
        .route(
            "/{project_id}/span-distribution",
            get(metrics::span_distribution),
        )
        .route(
            "/{project_id}/relation-distribution",
            get(metrics::relation_distribution),
        )
        .route(
            "/{project_id}/member-label-choices",
            get(metrics::member_label_choices),
        )
        .route(
            "/{project_id}/annotations-report",
            get(metrics::annotations_report),
        )
        .route(
            "/{project_id}/disagreement-report",
            get(metrics::disagreement_report),
        )
        .route(
            "/{project_id}/annotator-report",
            get(metrics::annotator_report),
        )
        .nest("/{project_id}/members", member_routes)
        .nest("/{project_id}/perspectives", perspective_routes)
        .nest("/{project_id}/label-types", label_type_routes)
        .nest("/{project_id}/examples", example_routes)
}
