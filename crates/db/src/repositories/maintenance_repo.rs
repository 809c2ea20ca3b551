//! Danger-zone maintenance operations.

use sqlx::PgPool;

/// Row counts removed by a [`MaintenanceRepo::reset_all`] run.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct ResetSummary {
    pub history_deleted: u64,
    pub attachments_deleted: u64,
    pub coverages_deleted: u64,
}

/// Bulk data-reset operations, outside the workflow engine.
pub struct MaintenanceRepo;

impl MaintenanceRepo {
    /// Delete all workflow data in one transaction: history first, then
    /// attachments linked to coverages, then the coverages themselves.
    /// Catalog tables and users are untouched.
    pub async fn reset_all(pool: &PgPool) -> Result<ResetSummary, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let history = sqlx::query("DELETE FROM workflow_history")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let attachments = sqlx::query("DELETE FROM attachments WHERE coverage_id IS NOT NULL")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let coverages = sqlx::query("DELETE FROM coverages")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(ResetSummary {
            history_deleted: history,
            attachments_deleted: attachments,
            coverages_deleted: coverages,
        })
    }
}
