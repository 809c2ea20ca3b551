//! Catalog entity models.
//!
//! Only the read surface the workflow engine needs: existence checks use
//! scalar queries, and option listings use these row types.

use diaria_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `payment_methods`, listed for the finance payable screen.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentMethod {
    pub id: DbId,
    pub description: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
