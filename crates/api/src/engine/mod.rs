//! The coverage workflow engine.
//!
//! Owns every state transition of a coverage record. Each operation runs
//! as one database transaction: the row is fetched with `FOR UPDATE`, the
//! transition is validated against the table in `diaria_core::workflow`,
//! and the status update plus its audit entry commit together or not at
//! all. Concurrent transitions on the same record serialize on the row
//! lock; the loser observes the advanced status and fails with an
//! illegal-transition error before any mutation.
//!
//! Authorization is checked before any write: role rules come from
//! `workflow::authorize`, creator ownership (resubmit) is checked here
//! where the record is at hand. Notifications go out only after commit
//! and never affect the outcome.

use diaria_core::error::CoreError;
use diaria_core::roles::{ROLE_ADMIN, ROLE_APPROVER, ROLE_SUPERVISOR};
use diaria_core::status::CoverageStatus;
use diaria_core::types::DbId;
use diaria_core::workflow::{
    authorize, next_status, require_note, validate_amount_cents, ApprovalStages, WorkflowOp,
};
use diaria_db::models::coverage::{
    AdminEditCoverage, AttachmentRef, Coverage, CoverageInput, PaymentDetails,
};
use diaria_db::repositories::{AttachmentRepo, CatalogRepo, CoverageRepo, HistoryRepo};
use diaria_db::DbPool;

use crate::config::WorkflowConfig;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::notifications::{
    Notifier, EVENT_ADJUSTMENT_REQUESTED, EVENT_CREATED, EVENT_REJECTED,
};

/// Validates and executes every legal state transition of a coverage.
pub struct WorkflowEngine {
    pool: DbPool,
    config: WorkflowConfig,
    notifier: Notifier,
}

impl WorkflowEngine {
    pub fn new(pool: DbPool, config: WorkflowConfig) -> Self {
        let notifier = Notifier::new(pool.clone());
        Self {
            pool,
            config,
            notifier,
        }
    }

    /// The configured number of approval tiers.
    pub fn stages(&self) -> ApprovalStages {
        self.config.approval_stages
    }

    // ── Create ───────────────────────────────────────────────────────

    /// Log a new coverage. Starts in `pending`; history begins at the
    /// first transition, so creation writes no audit entry.
    pub async fn create(&self, actor: &AuthUser, input: &CoverageInput) -> AppResult<Coverage> {
        if actor.role != ROLE_ADMIN && actor.role != ROLE_SUPERVISOR {
            return Err(CoreError::Forbidden(
                "Only supervisors may log coverages".into(),
            )
            .into());
        }

        self.validate_input(input).await?;

        let mut tx = self.pool.begin().await?;
        if self.config.double_booking_check {
            self.check_double_booking(&mut tx, input, None).await?;
        }
        let coverage = CoverageRepo::create(&mut *tx, actor.user_id, input).await?;
        tx.commit().await?;

        tracing::info!(
            coverage_id = coverage.id,
            supervisor_id = actor.user_id,
            amount_cents = coverage.amount_cents,
            "Coverage created",
        );
        self.notifier
            .send(coverage.id, EVENT_CREATED, ROLE_APPROVER)
            .await;

        Ok(coverage)
    }

    // ── Approve ──────────────────────────────────────────────────────

    /// Advance a coverage one approval tier. The target tier is derived
    /// from the current status and the configured stage count.
    pub async fn approve(
        &self,
        actor: &AuthUser,
        id: DbId,
        note: Option<&str>,
    ) -> AppResult<Coverage> {
        let mut tx = self.pool.begin().await?;
        let current = self.fetch_locked_status(&mut tx, id).await?.1;

        authorize(WorkflowOp::Approve, current, self.stages(), &actor.role)?;
        let next = next_status(current, WorkflowOp::Approve, self.stages())?;

        let updated = match next {
            CoverageStatus::ApprovedStage1 => {
                CoverageRepo::apply_stage1_approval(&mut *tx, id, actor.user_id, note).await?
            }
            _ => CoverageRepo::apply_final_approval(&mut *tx, id, actor.user_id).await?,
        };
        HistoryRepo::append(
            &mut *tx,
            id,
            actor.user_id,
            Some(current.as_str()),
            next.as_str(),
            note,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            coverage_id = id,
            approver_id = actor.user_id,
            status = %next,
            "Coverage approved",
        );
        Ok(updated)
    }

    // ── Reject ───────────────────────────────────────────────────────

    /// Reject a coverage with a mandatory reason. Terminal.
    pub async fn reject(&self, actor: &AuthUser, id: DbId, reason: &str) -> AppResult<Coverage> {
        require_note(reason, "reason")?;

        let mut tx = self.pool.begin().await?;
        let current = self.fetch_locked_status(&mut tx, id).await?.1;

        authorize(WorkflowOp::Reject, current, self.stages(), &actor.role)?;
        let next = next_status(current, WorkflowOp::Reject, self.stages())?;

        let updated = CoverageRepo::apply_rejection(&mut *tx, id, reason).await?;
        HistoryRepo::append(
            &mut *tx,
            id,
            actor.user_id,
            Some(current.as_str()),
            next.as_str(),
            Some(reason),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(coverage_id = id, approver_id = actor.user_id, "Coverage rejected");
        self.notifier
            .send(id, EVENT_REJECTED, ROLE_SUPERVISOR)
            .await;

        Ok(updated)
    }

    // ── Request adjustment ───────────────────────────────────────────

    /// Send a coverage back to its creator for correction.
    pub async fn request_adjustment(
        &self,
        actor: &AuthUser,
        id: DbId,
        note: &str,
    ) -> AppResult<Coverage> {
        require_note(note, "note")?;

        let mut tx = self.pool.begin().await?;
        let current = self.fetch_locked_status(&mut tx, id).await?.1;

        authorize(
            WorkflowOp::RequestAdjustment,
            current,
            self.stages(),
            &actor.role,
        )?;
        let next = next_status(current, WorkflowOp::RequestAdjustment, self.stages())?;

        let updated = CoverageRepo::apply_adjustment_request(&mut *tx, id, note).await?;
        HistoryRepo::append(
            &mut *tx,
            id,
            actor.user_id,
            Some(current.as_str()),
            next.as_str(),
            Some(note),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(coverage_id = id, approver_id = actor.user_id, "Adjustment requested");
        self.notifier
            .send(id, EVENT_ADJUSTMENT_REQUESTED, ROLE_SUPERVISOR)
            .await;

        Ok(updated)
    }

    // ── Resubmit ─────────────────────────────────────────────────────

    /// Correct and resubmit a coverage. Only the original creator (or an
    /// admin) may resubmit; the record returns to `pending` with the
    /// corrected field values. Prior approval/rejection audit fields stay
    /// in place; the history log carries the trail.
    pub async fn resubmit(
        &self,
        actor: &AuthUser,
        id: DbId,
        input: &CoverageInput,
    ) -> AppResult<Coverage> {
        self.validate_input(input).await?;

        let mut tx = self.pool.begin().await?;
        let (coverage, current) = self.fetch_locked_status(&mut tx, id).await?;

        authorize(WorkflowOp::Resubmit, current, self.stages(), &actor.role)?;
        if actor.role != ROLE_ADMIN && coverage.supervisor_id != actor.user_id {
            return Err(CoreError::Forbidden(
                "Only the original creator may resubmit this coverage".into(),
            )
            .into());
        }
        let next = next_status(current, WorkflowOp::Resubmit, self.stages())?;

        if self.config.double_booking_check {
            self.check_double_booking(&mut tx, input, Some(id)).await?;
        }

        let updated = CoverageRepo::apply_resubmit(&mut *tx, id, input).await?;
        HistoryRepo::append(
            &mut *tx,
            id,
            actor.user_id,
            Some(current.as_str()),
            next.as_str(),
            Some("Corrected and resubmitted"),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(coverage_id = id, user_id = actor.user_id, "Coverage resubmitted");
        Ok(updated)
    }

    // ── Pay ──────────────────────────────────────────────────────────

    /// Settle payment for a fully approved coverage. When a receipt
    /// reference is supplied, the attachment row commits in the same
    /// transaction as the transition.
    pub async fn pay(
        &self,
        actor: &AuthUser,
        id: DbId,
        details: &PaymentDetails,
        receipt: Option<&AttachmentRef>,
    ) -> AppResult<Coverage> {
        let mut tx = self.pool.begin().await?;
        let current = self.fetch_locked_status(&mut tx, id).await?.1;

        authorize(WorkflowOp::Pay, current, self.stages(), &actor.role)?;
        let next = next_status(current, WorkflowOp::Pay, self.stages())?;

        let updated = CoverageRepo::apply_payment(&mut *tx, id, actor.user_id, details).await?;
        if let Some(receipt) = receipt {
            AttachmentRepo::create_for_coverage(&mut *tx, id, actor.user_id, receipt).await?;
        }
        HistoryRepo::append(
            &mut *tx,
            id,
            actor.user_id,
            Some(current.as_str()),
            next.as_str(),
            details.payment_note.as_deref(),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            coverage_id = id,
            payer_id = actor.user_id,
            receipt_attached = receipt.is_some(),
            "Coverage paid",
        );
        Ok(updated)
    }

    // ── Admin edit ───────────────────────────────────────────────────

    /// Out-of-band field correction by an administrator. Status never
    /// changes; the audit entry records `from == to` so the correction
    /// leaves a trace.
    pub async fn admin_edit(
        &self,
        actor: &AuthUser,
        id: DbId,
        fields: &AdminEditCoverage,
    ) -> AppResult<Coverage> {
        if actor.role != ROLE_ADMIN {
            return Err(CoreError::Forbidden("Admin role required".into()).into());
        }
        if let Some(amount) = fields.amount_cents {
            validate_amount_cents(amount)?;
        }
        self.validate_edit_refs(fields).await?;

        let mut tx = self.pool.begin().await?;
        let current = self.fetch_locked_status(&mut tx, id).await?.1;

        let updated = CoverageRepo::apply_admin_edit(&mut *tx, id, fields).await?;
        HistoryRepo::append(
            &mut *tx,
            id,
            actor.user_id,
            Some(current.as_str()),
            current.as_str(),
            Some("Administrative correction"),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(coverage_id = id, admin_id = actor.user_id, "Coverage edited by admin");
        Ok(updated)
    }

    // ── Helpers ──────────────────────────────────────────────────────

    /// Fetch the coverage under a row lock and parse its status.
    async fn fetch_locked_status(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> AppResult<(Coverage, CoverageStatus)> {
        let coverage = CoverageRepo::find_by_id_for_update(&mut **tx, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Coverage",
                id,
            })?;
        let status = coverage.status()?;
        Ok((coverage, status))
    }

    /// Validate amount and that every reference points at an active
    /// catalog row. Shared by create and resubmit.
    async fn validate_input(&self, input: &CoverageInput) -> AppResult<()> {
        validate_amount_cents(input.amount_cents)?;

        if !CatalogRepo::active_posto_exists(&self.pool, input.posto_id).await? {
            return Err(validation_ref("posto_id", input.posto_id));
        }
        if !CatalogRepo::active_diarista_exists(&self.pool, input.diarista_id).await? {
            return Err(validation_ref("diarista_id", input.diarista_id));
        }
        if let Some(reserva_id) = input.reserva_id {
            if !CatalogRepo::active_reserva_exists(&self.pool, reserva_id).await? {
                return Err(validation_ref("reserva_id", reserva_id));
            }
        }
        if !CatalogRepo::active_motivo_exists(&self.pool, input.motivo_id).await? {
            return Err(validation_ref("motivo_id", input.motivo_id));
        }
        if !CatalogRepo::active_shift_exists(&self.pool, input.shift_id).await? {
            return Err(validation_ref("shift_id", input.shift_id));
        }
        if !CatalogRepo::active_payment_method_exists(
            &self.pool,
            input.requested_payment_method_id,
        )
        .await?
        {
            return Err(validation_ref(
                "requested_payment_method_id",
                input.requested_payment_method_id,
            ));
        }
        if let Some(company_id) = input.company_id {
            if !CatalogRepo::active_company_exists(&self.pool, company_id).await? {
                return Err(validation_ref("company_id", company_id));
            }
        }
        Ok(())
    }

    /// Validate the references an admin edit is changing.
    async fn validate_edit_refs(&self, fields: &AdminEditCoverage) -> AppResult<()> {
        if let Some(id) = fields.posto_id {
            if !CatalogRepo::active_posto_exists(&self.pool, id).await? {
                return Err(validation_ref("posto_id", id));
            }
        }
        if let Some(id) = fields.diarista_id {
            if !CatalogRepo::active_diarista_exists(&self.pool, id).await? {
                return Err(validation_ref("diarista_id", id));
            }
        }
        if let Some(id) = fields.reserva_id {
            if !CatalogRepo::active_reserva_exists(&self.pool, id).await? {
                return Err(validation_ref("reserva_id", id));
            }
        }
        if let Some(id) = fields.motivo_id {
            if !CatalogRepo::active_motivo_exists(&self.pool, id).await? {
                return Err(validation_ref("motivo_id", id));
            }
        }
        if let Some(id) = fields.company_id {
            if !CatalogRepo::active_company_exists(&self.pool, id).await? {
                return Err(validation_ref("company_id", id));
            }
        }
        Ok(())
    }

    /// The same-day double-booking rule: a diarista may not work twice on
    /// one date, and a named (non-pool) reserva may not be covered twice
    /// on one date. Rejected records do not count. `exclude_id` skips the
    /// record being resubmitted.
    async fn check_double_booking(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &CoverageInput,
        exclude_id: Option<DbId>,
    ) -> AppResult<()> {
        let diarista_bookings = CoverageRepo::count_for_diarista_on_date(
            &mut **tx,
            input.diarista_id,
            input.coverage_date,
            exclude_id,
        )
        .await?;
        if diarista_bookings > 0 {
            return Err(CoreError::Conflict(
                "This diarista already has a booking for this date".into(),
            )
            .into());
        }

        if let Some(reserva_id) = input.reserva_id {
            let is_pool = CatalogRepo::reserva_is_pool(&self.pool, reserva_id)
                .await?
                .unwrap_or(false);
            if !is_pool {
                let reserva_coverages = CoverageRepo::count_for_reserva_on_date(
                    &mut **tx,
                    reserva_id,
                    input.coverage_date,
                    exclude_id,
                )
                .await?;
                if reserva_coverages > 0 {
                    return Err(CoreError::Conflict(
                        "This worker is already covered on this date".into(),
                    )
                    .into());
                }
            }
        }
        Ok(())
    }
}

fn validation_ref(field: &str, id: DbId) -> AppError {
    CoreError::Validation(format!("{field} {id} does not reference an active record")).into()
}
