//! Repository for the append-only `workflow_history` table.

use diaria_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::history::WorkflowHistoryEntry;

const COLUMNS: &str = "id, coverage_id, user_id, from_status, to_status, note, created_at";

/// Provides append and read operations for the workflow audit trail.
///
/// There is deliberately no update or delete here: entries are immutable
/// once written (the maintenance reset bypasses this repository).
pub struct HistoryRepo;

impl HistoryRepo {
    /// Append one audit entry. Runs on the caller's transaction so the
    /// entry commits together with the coverage update it describes.
    pub async fn append(
        conn: &mut PgConnection,
        coverage_id: DbId,
        user_id: DbId,
        from_status: Option<&str>,
        to_status: &str,
        note: Option<&str>,
    ) -> Result<WorkflowHistoryEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO workflow_history (coverage_id, user_id, from_status, to_status, note)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkflowHistoryEntry>(&query)
            .bind(coverage_id)
            .bind(user_id)
            .bind(from_status)
            .bind(to_status)
            .bind(note)
            .fetch_one(conn)
            .await
    }

    /// List the full trail for one coverage, oldest entry first.
    pub async fn list_for_coverage(
        pool: &PgPool,
        coverage_id: DbId,
    ) -> Result<Vec<WorkflowHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workflow_history
             WHERE coverage_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, WorkflowHistoryEntry>(&query)
            .bind(coverage_id)
            .fetch_all(pool)
            .await
    }

    /// Number of trail entries for one coverage.
    pub async fn count_for_coverage(pool: &PgPool, coverage_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM workflow_history WHERE coverage_id = $1",
        )
        .bind(coverage_id)
        .fetch_one(pool)
        .await
    }
}
