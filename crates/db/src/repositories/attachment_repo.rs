//! Repository for the `attachments` table.

use diaria_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::attachment::Attachment;
use crate::models::coverage::AttachmentRef;

const COLUMNS: &str =
    "id, coverage_id, uploader_id, url, original_name, size_bytes, mime_type, created_at";

/// Provides persistence for payment receipt references.
pub struct AttachmentRepo;

impl AttachmentRepo {
    /// Link an already-stored receipt to a coverage. Runs on the caller's
    /// transaction so the link commits together with the pay transition.
    pub async fn create_for_coverage(
        conn: &mut PgConnection,
        coverage_id: DbId,
        uploader_id: DbId,
        receipt: &AttachmentRef,
    ) -> Result<Attachment, sqlx::Error> {
        let query = format!(
            "INSERT INTO attachments (coverage_id, uploader_id, url, original_name, size_bytes, mime_type)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(coverage_id)
            .bind(uploader_id)
            .bind(&receipt.url)
            .bind(&receipt.original_name)
            .bind(receipt.size_bytes)
            .bind(&receipt.mime_type)
            .fetch_one(conn)
            .await
    }

    /// List receipts linked to a coverage.
    pub async fn list_for_coverage(
        pool: &PgPool,
        coverage_id: DbId,
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attachments WHERE coverage_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(coverage_id)
            .fetch_all(pool)
            .await
    }
}
