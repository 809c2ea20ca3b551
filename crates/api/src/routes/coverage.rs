//! Route definitions for the `/coverages` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::coverage;
use crate::state::AppState;

/// Routes mounted at `/coverages`.
///
/// ```text
/// GET    /                 -> list_coverages
/// POST   /                 -> create_coverage
/// GET    /{id}             -> get_coverage
/// POST   /{id}/resubmit    -> resubmit_coverage
/// GET    /{id}/history     -> coverage_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(coverage::list_coverages).post(coverage::create_coverage),
        )
        .route("/{id}", get(coverage::get_coverage))
        .route("/{id}/resubmit", post(coverage::resubmit_coverage))
        .route("/{id}/history", get(coverage::coverage_history))
}
