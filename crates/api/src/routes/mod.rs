//! Route definitions.

pub mod billing;
pub mod company;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /companies                       list, create
/// /companies/{id}                  get, update, delete
///
/// /projects                        list, create (guarded)
/// /projects/{id}                   get, update (guarded), delete
/// /projects/{id}/documents         list, create
/// /projects/{id}/photos            list, create
///
/// /billing/projects                started-in-range query
/// /billing/summary                 per-contractor totals
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/companies", company::router())
        .nest("/projects", project::router())
        .nest("/billing", billing::router())
}
