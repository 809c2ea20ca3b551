//! Payment receipt attachment models.

use diaria_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `attachments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attachment {
    pub id: DbId,
    pub coverage_id: Option<DbId>,
    pub uploader_id: DbId,
    pub url: String,
    pub original_name: String,
    pub size_bytes: i64,
    pub mime_type: String,
    pub created_at: Timestamp,
}
