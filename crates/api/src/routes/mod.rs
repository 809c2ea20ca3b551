pub mod admin;
pub mod approval;
pub mod auth;
pub mod coverage;
pub mod health;
pub mod payment;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
///
/// /coverages                           list own, create (supervisor)
/// /coverages/{id}                      get (creator or admin)
/// /coverages/{id}/resubmit             correct and resubmit (creator)
/// /coverages/{id}/history              audit trail
///
/// /approvals/queue                     pending queue for the caller's tier
/// /approvals/{id}/approve              advance one approval tier
/// /approvals/{id}/reject               reject with reason
/// /approvals/{id}/request-adjustment   send back for correction
///
/// /payments/payable                    approved coverages + payment methods
/// /payments/{id}/pay                   settle payment (optional receipt)
///
/// /admin/coverages                     full listing (?status=...)
/// /admin/coverages/{id}                out-of-band field correction (PUT)
/// /admin/maintenance/reset             wipe all workflow data (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (public).
        .nest("/auth", auth::router())
        // Supervisor-facing coverage logging.
        .nest("/coverages", coverage::router())
        // Approver queue and transitions.
        .nest("/approvals", approval::router())
        // Finance payment settlement.
        .nest("/payments", payment::router())
        // Administration and maintenance.
        .nest("/admin", admin::router())
}
