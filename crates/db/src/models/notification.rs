//! Notification intent models.

use diaria_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table: a fire-and-forget intent
/// `{coverage, event, recipient role}` emitted after a transition.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub coverage_id: DbId,
    pub event: String,
    pub recipient_role: String,
    pub created_at: Timestamp,
}
