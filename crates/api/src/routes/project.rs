//! Route definitions for the projects resource and its activity trail.

use axum::routing::get;
use axum::Router;

use crate::handlers::{activity, project};
use crate::state::AppState;

/// Project routes mounted at `/projects`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{id}/documents",
            get(activity::list_documents).post(activity::create_document),
        )
        .route(
            "/{id}/photos",
            get(activity::list_photos).post(activity::create_photo),
        )
}
