//! The coverage workflow transition table and its authorization rules.
//!
//! The engine supports one or two approval stages, selected by
//! configuration rather than by separate code paths. Every transition is
//! decided by [`next_status`] over `(current, operation, stages)`; anything
//! the table does not name is an illegal transition.

use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_APPROVER, ROLE_APPROVER_FINAL, ROLE_FINANCE, ROLE_SUPERVISOR};
use crate::status::CoverageStatus;

/// How many approval tiers a coverage must clear before payment.
///
/// `One` is the canonical default: `pending -> approved`. `Two` routes
/// through the intermediate tier: `pending -> approved_stage1 -> approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalStages {
    One,
    Two,
}

impl ApprovalStages {
    /// Parse a stage count from configuration. Only 1 and 2 are meaningful.
    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            1 => Some(ApprovalStages::One),
            2 => Some(ApprovalStages::Two),
            _ => None,
        }
    }
}

/// A state-changing operation on a coverage record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowOp {
    Approve,
    Reject,
    RequestAdjustment,
    Resubmit,
    Pay,
}

impl WorkflowOp {
    /// Human-readable operation name, used in errors and history notes.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowOp::Approve => "approve",
            WorkflowOp::Reject => "reject",
            WorkflowOp::RequestAdjustment => "request adjustment for",
            WorkflowOp::Resubmit => "resubmit",
            WorkflowOp::Pay => "pay",
        }
    }
}

/// Resolve the successor status for an operation, or fail with
/// [`CoreError::IllegalTransition`] when the operation is not legal from
/// the current status.
///
/// Stage order is always enforced: in two-stage mode no role may jump
/// `pending -> approved` directly.
pub fn next_status(
    current: CoverageStatus,
    op: WorkflowOp,
    stages: ApprovalStages,
) -> Result<CoverageStatus, CoreError> {
    use CoverageStatus::*;

    let next = match (op, stages, current) {
        (WorkflowOp::Approve, ApprovalStages::One, Pending) => Approved,
        (WorkflowOp::Approve, ApprovalStages::Two, Pending) => ApprovedStage1,
        (WorkflowOp::Approve, ApprovalStages::Two, ApprovedStage1) => Approved,

        (WorkflowOp::Reject, _, Pending | ApprovedStage1) => Rejected,
        (WorkflowOp::RequestAdjustment, _, Pending | ApprovedStage1) => AdjustmentRequested,

        (WorkflowOp::Resubmit, _, Pending | AdjustmentRequested) => Pending,

        (WorkflowOp::Pay, _, Approved) => Paid,

        _ => {
            return Err(CoreError::IllegalTransition {
                current: current.as_str().to_string(),
                attempted: op.as_str(),
            })
        }
    };
    Ok(next)
}

/// Check that `role` is permitted to run `op` from `current`.
///
/// Admins may run every operation. The approve check is status-sensitive:
/// in two-stage mode the first tier (`approver`) acts from `pending` and
/// the final tier (`approver_final`) from `approved_stage1`.
///
/// Ownership rules (resubmit by the original creator) are enforced by the
/// engine, which has the record at hand; this function only covers roles.
pub fn authorize(
    op: WorkflowOp,
    current: CoverageStatus,
    stages: ApprovalStages,
    role: &str,
) -> Result<(), CoreError> {
    if role == ROLE_ADMIN {
        return Ok(());
    }

    let allowed = match op {
        WorkflowOp::Approve => match (stages, current) {
            (ApprovalStages::One, _) => role == ROLE_APPROVER,
            (ApprovalStages::Two, CoverageStatus::ApprovedStage1) => role == ROLE_APPROVER_FINAL,
            (ApprovalStages::Two, _) => role == ROLE_APPROVER,
        },
        WorkflowOp::Reject | WorkflowOp::RequestAdjustment => {
            role == ROLE_APPROVER || role == ROLE_APPROVER_FINAL
        }
        WorkflowOp::Resubmit => role == ROLE_SUPERVISOR,
        WorkflowOp::Pay => role == ROLE_FINANCE,
    };

    if allowed {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Role '{role}' may not {} this coverage",
            op.as_str()
        )))
    }
}

/// Monetary amounts are stored as integer cents and must be positive.
pub fn validate_amount_cents(amount_cents: i64) -> Result<(), CoreError> {
    if amount_cents <= 0 {
        return Err(CoreError::Validation(
            "amount_cents must be greater than zero".into(),
        ));
    }
    Ok(())
}

/// Rejections and adjustment requests must carry a non-empty note.
pub fn require_note(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
