//! Best-effort notification sink.
//!
//! After a successful Create, Reject, or RequestAdjustment the engine
//! emits an intent `{coverage, event, recipient role}` here. Delivery is
//! fire-and-forget: a failed insert is logged and never propagated, so a
//! notification failure can never roll back or block a workflow
//! transition that has already committed.

use diaria_core::types::DbId;
use diaria_db::repositories::NotificationRepo;
use diaria_db::DbPool;

/// A new coverage awaits approval.
pub const EVENT_CREATED: &str = "coverage.created";
/// A coverage was rejected.
pub const EVENT_REJECTED: &str = "coverage.rejected";
/// A coverage was sent back for correction.
pub const EVENT_ADJUSTMENT_REQUESTED: &str = "coverage.adjustment_requested";

/// Records notification intents for downstream delivery.
#[derive(Clone)]
pub struct Notifier {
    pool: DbPool,
}

impl Notifier {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record one intent. Failures are logged and swallowed.
    pub async fn send(&self, coverage_id: DbId, event: &str, recipient_role: &str) {
        if let Err(e) = NotificationRepo::create(&self.pool, coverage_id, event, recipient_role).await
        {
            tracing::warn!(
                coverage_id,
                event,
                recipient_role,
                error = %e,
                "Failed to record notification (transition already committed)",
            );
        }
    }
}
