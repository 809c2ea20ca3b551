//! Route definitions for the `/approvals` resource.
//!
//! All endpoints require an approver-tier (or admin) role.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::approval;
use crate::state::AppState;

/// Routes mounted at `/approvals`.
///
/// ```text
/// GET    /queue                      -> approval_queue
/// POST   /{id}/approve               -> approve_coverage
/// POST   /{id}/reject                -> reject_coverage
/// POST   /{id}/request-adjustment    -> request_adjustment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/queue", get(approval::approval_queue))
        .route("/{id}/approve", post(approval::approve_coverage))
        .route("/{id}/reject", post(approval::reject_coverage))
        .route(
            "/{id}/request-adjustment",
            post(approval::request_adjustment),
        )
}
