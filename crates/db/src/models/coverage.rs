//! Coverage entity models and DTOs.

use chrono::NaiveDate;
use diaria_core::error::CoreError;
use diaria_core::status::CoverageStatus;
use diaria_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `coverages` table.
///
/// `status` is stored as text; use [`Coverage::status`] to get the typed
/// enum.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Coverage {
    pub id: DbId,
    pub coverage_date: NaiveDate,
    pub posto_id: DbId,
    pub diarista_id: DbId,
    pub reserva_id: Option<DbId>,
    pub motivo_id: DbId,
    pub shift_id: DbId,
    pub requested_payment_method_id: DbId,
    pub company_id: Option<DbId>,
    pub amount_cents: i64,
    pub status: String,
    pub supervisor_id: DbId,
    pub observation: Option<String>,

    pub approver_n1_id: Option<DbId>,
    pub approved_n1_at: Option<Timestamp>,
    pub approval_n1_note: Option<String>,

    pub approver_id: Option<DbId>,
    pub approved_at: Option<Timestamp>,

    pub rejection_reason: Option<String>,
    pub adjustment_request: Option<String>,

    pub payer_id: Option<DbId>,
    pub paid_at: Option<Timestamp>,
    pub effective_payment_method_id: Option<DbId>,
    pub payment_note: Option<String>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Coverage {
    /// Parse the stored status column into the typed enum.
    pub fn status(&self) -> Result<CoverageStatus, CoreError> {
        CoverageStatus::parse(&self.status)
    }
}

/// Input for creating or resubmitting a coverage. Resubmission applies the
/// same validation as creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CoverageInput {
    pub coverage_date: NaiveDate,
    pub posto_id: DbId,
    pub diarista_id: DbId,
    pub reserva_id: Option<DbId>,
    pub motivo_id: DbId,
    pub shift_id: DbId,
    pub requested_payment_method_id: DbId,
    pub company_id: Option<DbId>,
    pub amount_cents: i64,
    pub observation: Option<String>,
}

/// Admin out-of-band correction. Only non-`None` fields are applied;
/// status is never touched.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminEditCoverage {
    pub coverage_date: Option<NaiveDate>,
    pub posto_id: Option<DbId>,
    pub diarista_id: Option<DbId>,
    pub reserva_id: Option<DbId>,
    pub motivo_id: Option<DbId>,
    pub amount_cents: Option<i64>,
    pub company_id: Option<DbId>,
}

/// Payment settlement details supplied on the pay transition.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentDetails {
    pub paid_at: Timestamp,
    pub effective_payment_method_id: DbId,
    pub payment_note: Option<String>,
}

/// Reference to an already-stored receipt file. Upload happens outside
/// the engine; only the stored location and metadata arrive here.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentRef {
    pub url: String,
    pub original_name: String,
    pub size_bytes: i64,
    pub mime_type: String,
}

/// An approval-queue item: the pending coverage joined with catalog names
/// and the informational per-month counts shown to approvers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApprovalQueueItem {
    pub id: DbId,
    pub coverage_date: NaiveDate,
    pub status: String,
    pub amount_cents: i64,
    pub observation: Option<String>,
    pub posto_name: String,
    pub diarista_name: String,
    pub reserva_name: Option<String>,
    pub motivo_name: String,
    pub supervisor_name: String,
    /// Approved or paid coverages for this diarista in the coverage's month.
    pub diarista_month_count: i64,
    /// Covered absences for this reserva in the coverage's month (0 when the
    /// record points at the reserve pool).
    pub reserva_month_count: i64,
}
