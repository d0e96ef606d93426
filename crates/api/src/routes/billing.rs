//! Route definitions for billing-period queries.

use axum::routing::get;
use axum::Router;

use crate::handlers::billing;
use crate::state::AppState;

/// Billing routes mounted at `/billing`.
///
/// ```text
/// GET /projects   -> list_started_projects
/// GET /summary    -> billing_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(billing::list_started_projects))
        .route("/summary", get(billing::billing_summary))
}
