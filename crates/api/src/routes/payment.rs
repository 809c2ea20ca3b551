//! Route definitions for the `/payments` resource.
//!
//! All endpoints require the `finance` (or admin) role.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payment;
use crate::state::AppState;

/// Routes mounted at `/payments`.
///
/// ```text
/// GET    /payable      -> list_payable
/// POST   /{id}/pay     -> pay_coverage
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/payable", get(payment::list_payable))
        .route("/{id}/pay", post(payment::pay_coverage))
}
