//! Repository for the `coverages` table.
//!
//! Transition writes take a `&mut PgConnection` so the engine can compose
//! them with the history append inside one transaction. Reads take the
//! pool directly.

use diaria_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::coverage::{
    AdminEditCoverage, ApprovalQueueItem, Coverage, CoverageInput, PaymentDetails,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, coverage_date, posto_id, diarista_id, reserva_id, motivo_id, \
    shift_id, requested_payment_method_id, company_id, amount_cents, status, supervisor_id, \
    observation, approver_n1_id, approved_n1_at, approval_n1_note, approver_id, approved_at, \
    rejection_reason, adjustment_request, payer_id, paid_at, effective_payment_method_id, \
    payment_note, created_at, updated_at";

/// Provides persistence operations for coverage records.
pub struct CoverageRepo;

impl CoverageRepo {
    // ── Writes (transaction-scoped) ──────────────────────────────────

    /// Insert a new coverage with `status = 'pending'`.
    pub async fn create(
        conn: &mut PgConnection,
        supervisor_id: DbId,
        input: &CoverageInput,
    ) -> Result<Coverage, sqlx::Error> {
        let query = format!(
            "INSERT INTO coverages
                (coverage_date, posto_id, diarista_id, reserva_id, motivo_id, shift_id,
                 requested_payment_method_id, company_id, amount_cents, observation,
                 supervisor_id, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'pending')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Coverage>(&query)
            .bind(input.coverage_date)
            .bind(input.posto_id)
            .bind(input.diarista_id)
            .bind(input.reserva_id)
            .bind(input.motivo_id)
            .bind(input.shift_id)
            .bind(input.requested_payment_method_id)
            .bind(input.company_id)
            .bind(input.amount_cents)
            .bind(&input.observation)
            .bind(supervisor_id)
            .fetch_one(conn)
            .await
    }

    /// Fetch a coverage and take a row lock on it.
    ///
    /// Every transition reads through this inside its transaction, which
    /// serializes concurrent transition attempts on the same record: the
    /// loser blocks here and then observes the already-advanced status.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Coverage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM coverages WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Coverage>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Record a stage-1 approval: status plus the N1 audit fields.
    pub async fn apply_stage1_approval(
        conn: &mut PgConnection,
        id: DbId,
        approver_id: DbId,
        note: Option<&str>,
    ) -> Result<Coverage, sqlx::Error> {
        let query = format!(
            "UPDATE coverages SET
                status = 'approved_stage1',
                approver_n1_id = $2,
                approved_n1_at = now(),
                approval_n1_note = $3,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Coverage>(&query)
            .bind(id)
            .bind(approver_id)
            .bind(note)
            .fetch_one(conn)
            .await
    }

    /// Record the final approval: status plus the final-approver audit fields.
    pub async fn apply_final_approval(
        conn: &mut PgConnection,
        id: DbId,
        approver_id: DbId,
    ) -> Result<Coverage, sqlx::Error> {
        let query = format!(
            "UPDATE coverages SET
                status = 'approved',
                approver_id = $2,
                approved_at = now(),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Coverage>(&query)
            .bind(id)
            .bind(approver_id)
            .fetch_one(conn)
            .await
    }

    /// Record a rejection with its mandatory reason.
    pub async fn apply_rejection(
        conn: &mut PgConnection,
        id: DbId,
        reason: &str,
    ) -> Result<Coverage, sqlx::Error> {
        let query = format!(
            "UPDATE coverages SET
                status = 'rejected',
                rejection_reason = $2,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Coverage>(&query)
            .bind(id)
            .bind(reason)
            .fetch_one(conn)
            .await
    }

    /// Record an adjustment request with its mandatory note.
    pub async fn apply_adjustment_request(
        conn: &mut PgConnection,
        id: DbId,
        note: &str,
    ) -> Result<Coverage, sqlx::Error> {
        let query = format!(
            "UPDATE coverages SET
                status = 'adjustment_requested',
                adjustment_request = $2,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Coverage>(&query)
            .bind(id)
            .bind(note)
            .fetch_one(conn)
            .await
    }

    /// Apply a resubmission: all editable fields plus a forced reset to
    /// `pending`. Prior approval/rejection audit fields are left intact;
    /// the history log is the record of what happened before.
    pub async fn apply_resubmit(
        conn: &mut PgConnection,
        id: DbId,
        input: &CoverageInput,
    ) -> Result<Coverage, sqlx::Error> {
        let query = format!(
            "UPDATE coverages SET
                coverage_date = $2,
                posto_id = $3,
                diarista_id = $4,
                reserva_id = $5,
                motivo_id = $6,
                shift_id = $7,
                requested_payment_method_id = $8,
                company_id = $9,
                amount_cents = $10,
                observation = $11,
                status = 'pending',
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Coverage>(&query)
            .bind(id)
            .bind(input.coverage_date)
            .bind(input.posto_id)
            .bind(input.diarista_id)
            .bind(input.reserva_id)
            .bind(input.motivo_id)
            .bind(input.shift_id)
            .bind(input.requested_payment_method_id)
            .bind(input.company_id)
            .bind(input.amount_cents)
            .bind(&input.observation)
            .fetch_one(conn)
            .await
    }

    /// Record payment settlement.
    pub async fn apply_payment(
        conn: &mut PgConnection,
        id: DbId,
        payer_id: DbId,
        details: &PaymentDetails,
    ) -> Result<Coverage, sqlx::Error> {
        let query = format!(
            "UPDATE coverages SET
                status = 'paid',
                payer_id = $2,
                paid_at = $3,
                effective_payment_method_id = $4,
                payment_note = $5,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Coverage>(&query)
            .bind(id)
            .bind(payer_id)
            .bind(details.paid_at)
            .bind(details.effective_payment_method_id)
            .bind(&details.payment_note)
            .fetch_one(conn)
            .await
    }

    /// Apply an admin field correction. Only non-`None` fields change;
    /// status is never touched here.
    pub async fn apply_admin_edit(
        conn: &mut PgConnection,
        id: DbId,
        fields: &AdminEditCoverage,
    ) -> Result<Coverage, sqlx::Error> {
        let query = format!(
            "UPDATE coverages SET
                coverage_date = COALESCE($2, coverage_date),
                posto_id = COALESCE($3, posto_id),
                diarista_id = COALESCE($4, diarista_id),
                reserva_id = COALESCE($5, reserva_id),
                motivo_id = COALESCE($6, motivo_id),
                amount_cents = COALESCE($7, amount_cents),
                company_id = COALESCE($8, company_id),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Coverage>(&query)
            .bind(id)
            .bind(fields.coverage_date)
            .bind(fields.posto_id)
            .bind(fields.diarista_id)
            .bind(fields.reserva_id)
            .bind(fields.motivo_id)
            .bind(fields.amount_cents)
            .bind(fields.company_id)
            .fetch_one(conn)
            .await
    }

    // ── Double-booking checks ────────────────────────────────────────

    /// Count non-rejected coverages for a diarista on a date, optionally
    /// excluding one record (the one being resubmitted).
    pub async fn count_for_diarista_on_date(
        conn: &mut PgConnection,
        diarista_id: DbId,
        date: chrono::NaiveDate,
        exclude_id: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM coverages
             WHERE diarista_id = $1
               AND coverage_date = $2
               AND status <> 'rejected'
               AND ($3::BIGINT IS NULL OR id <> $3)",
        )
        .bind(diarista_id)
        .bind(date)
        .bind(exclude_id)
        .fetch_one(conn)
        .await
    }

    /// Count non-rejected coverages for a named reserva on a date,
    /// optionally excluding one record.
    pub async fn count_for_reserva_on_date(
        conn: &mut PgConnection,
        reserva_id: DbId,
        date: chrono::NaiveDate,
        exclude_id: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM coverages
             WHERE reserva_id = $1
               AND coverage_date = $2
               AND status <> 'rejected'
               AND ($3::BIGINT IS NULL OR id <> $3)",
        )
        .bind(reserva_id)
        .bind(date)
        .bind(exclude_id)
        .fetch_one(conn)
        .await
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Find a coverage by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Coverage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM coverages WHERE id = $1");
        sqlx::query_as::<_, Coverage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a supervisor's own coverages, newest work date first.
    pub async fn list_by_supervisor(
        pool: &PgPool,
        supervisor_id: DbId,
    ) -> Result<Vec<Coverage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM coverages
             WHERE supervisor_id = $1
             ORDER BY coverage_date DESC, id DESC"
        );
        sqlx::query_as::<_, Coverage>(&query)
            .bind(supervisor_id)
            .fetch_all(pool)
            .await
    }

    /// List all coverages, optionally filtered by status. Admin view.
    pub async fn list_all(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<Coverage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM coverages
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY coverage_date DESC, id DESC"
        );
        sqlx::query_as::<_, Coverage>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// List coverages awaiting payment (status = 'approved'), oldest first.
    pub async fn list_payable(pool: &PgPool) -> Result<Vec<Coverage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM coverages
             WHERE status = 'approved'
             ORDER BY coverage_date ASC, id ASC"
        );
        sqlx::query_as::<_, Coverage>(&query).fetch_all(pool).await
    }

    /// The approver queue for a given status, joined with catalog names
    /// and enriched with informational per-month counts: how many times
    /// the diarista was approved/paid in the coverage's month, and how
    /// many times the reserva was covered. These counts are read-only
    /// display data, not part of the mutation path.
    pub async fn approval_queue(
        pool: &PgPool,
        status: &str,
    ) -> Result<Vec<ApprovalQueueItem>, sqlx::Error> {
        sqlx::query_as::<_, ApprovalQueueItem>(
            "SELECT
                c.id, c.coverage_date, c.status, c.amount_cents, c.observation,
                p.name AS posto_name,
                d.name AS diarista_name,
                r.name AS reserva_name,
                m.name AS motivo_name,
                u.name AS supervisor_name,
                (SELECT COUNT(*) FROM coverages c2
                  WHERE c2.diarista_id = c.diarista_id
                    AND c2.status IN ('approved', 'paid')
                    AND date_trunc('month', c2.coverage_date) = date_trunc('month', c.coverage_date)
                ) AS diarista_month_count,
                (SELECT COUNT(*) FROM coverages c3
                  WHERE c3.reserva_id = c.reserva_id
                    AND c3.status IN ('approved', 'paid')
                    AND date_trunc('month', c3.coverage_date) = date_trunc('month', c.coverage_date)
                ) AS reserva_month_count
             FROM coverages c
             JOIN postos p ON p.id = c.posto_id
             JOIN diaristas d ON d.id = c.diarista_id
             LEFT JOIN reservas r ON r.id = c.reserva_id
             JOIN motivos m ON m.id = c.motivo_id
             JOIN users u ON u.id = c.supervisor_id
             WHERE c.status = $1
             ORDER BY c.coverage_date ASC, c.id ASC",
        )
        .bind(status)
        .fetch_all(pool)
        .await
    }
}
