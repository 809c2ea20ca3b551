//! Read-only access to the catalog tables.
//!
//! The workflow engine validates that every reference in a coverage input
//! points at an existing, active catalog row before inserting. Full
//! catalog CRUD is out of scope; only this check surface exists.

use diaria_core::types::DbId;
use sqlx::PgPool;

use crate::models::catalog::PaymentMethod;

/// Provides existence checks and option listings for catalog entities.
pub struct CatalogRepo;

impl CatalogRepo {
    pub async fn active_posto_exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        Self::active_exists(pool, "postos", id).await
    }

    pub async fn active_diarista_exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        Self::active_exists(pool, "diaristas", id).await
    }

    pub async fn active_reserva_exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        Self::active_exists(pool, "reservas", id).await
    }

    pub async fn active_motivo_exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        Self::active_exists(pool, "motivos", id).await
    }

    pub async fn active_shift_exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        Self::active_exists(pool, "shifts", id).await
    }

    pub async fn active_payment_method_exists(
        pool: &PgPool,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        Self::active_exists(pool, "payment_methods", id).await
    }

    pub async fn active_company_exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        Self::active_exists(pool, "companies", id).await
    }

    /// Whether a reserva is the generic reserve-pool placeholder.
    /// Returns `None` when the id does not exist.
    pub async fn reserva_is_pool(pool: &PgPool, id: DbId) -> Result<Option<bool>, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT is_pool FROM reservas WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active payment methods for the finance payable screen.
    pub async fn list_active_payment_methods(
        pool: &PgPool,
    ) -> Result<Vec<PaymentMethod>, sqlx::Error> {
        sqlx::query_as::<_, PaymentMethod>(
            "SELECT id, description, is_active, created_at, updated_at
             FROM payment_methods
             WHERE is_active
             ORDER BY description ASC",
        )
        .fetch_all(pool)
        .await
    }

    // `table` is always one of the static names above, never user input.
    async fn active_exists(pool: &PgPool, table: &str, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1 AND is_active)");
        sqlx::query_scalar::<_, bool>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
