//! Workflow audit trail models.

use diaria_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `workflow_history` table.
///
/// Admin field edits record an entry with `from_status == to_status`,
/// a trace without a status change.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkflowHistoryEntry {
    pub id: DbId,
    pub coverage_id: DbId,
    pub user_id: DbId,
    pub from_status: Option<String>,
    pub to_status: String,
    pub note: Option<String>,
    pub created_at: Timestamp,
}
