//! Route definitions for `/admin`.
//!
//! All endpoints require the `admin` role.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /coverages            -> list_all_coverages (?status=...)
/// PUT    /coverages/{id}       -> edit_coverage
/// DELETE /maintenance/reset    -> maintenance_reset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/coverages", get(admin::list_all_coverages))
        .route("/coverages/{id}", put(admin::edit_coverage))
        .route("/maintenance/reset", delete(admin::maintenance_reset))
}
