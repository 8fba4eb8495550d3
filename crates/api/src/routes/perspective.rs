use axum::routing::get;
use axum::Router;

use crate::handlers::annotator_perspective;
use crate::state::AppState;

/// Routes mounted at `/perspectives`.
///
/// ```text
/// GET    /{perspective_id}/annotators          -> list
/// POST   /{perspective_id}/annotators          -> create (binds the caller)
/// GET    /{perspective_id}/annotators/{id}     -> get_by_id
/// PUT    /{perspective_id}/annotators/{id}     -> update
/// PATCH  /{perspective_id}/annotators/{id}     -> update
/// DELETE /{perspective_id}/annotators/{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{perspective_id}/annotators",
            get(annotator_perspective::list).post(annotator_perspective::create),
        )
        .route(
            "/{perspective_id}/annotators/{id}",
            get(annotator_perspective::get_by_id)
                .put(annotator_perspective::update)
                .patch(annotator_perspective::update)
                .delete(annotator_perspective::delete),
        )
}
