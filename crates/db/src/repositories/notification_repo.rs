//! Repository for the `notifications` table.

use diaria_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::Notification;

const COLUMNS: &str = "id, coverage_id, event, recipient_role, created_at";

/// Provides persistence for fire-and-forget notification intents.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Record a notification intent. Callers treat failure as non-fatal.
    pub async fn create(
        pool: &PgPool,
        coverage_id: DbId,
        event: &str,
        recipient_role: &str,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (coverage_id, event, recipient_role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(coverage_id)
            .bind(event)
            .bind(recipient_role)
            .fetch_one(pool)
            .await
    }

    /// List intents recorded for one coverage, oldest first.
    pub async fn list_for_coverage(
        pool: &PgPool,
        coverage_id: DbId,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications WHERE coverage_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(coverage_id)
            .fetch_all(pool)
            .await
    }
}
