//! Coverage lifecycle statuses.
//!
//! The status column is the sole source of truth for a coverage's position
//! in the approval/payment workflow. Statuses are stored as lowercase text
//! in the `coverages.status` column; [`CoverageStatus::parse`] converts a
//! stored value back into the enum.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The workflow position of a coverage record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    /// Awaiting approval (initial status, also the target of a resubmit).
    Pending,
    /// Cleared the first approval tier; only reachable in two-stage mode.
    ApprovedStage1,
    /// Fully approved, ready for payment.
    Approved,
    /// Rejected by an approver. Terminal.
    Rejected,
    /// Sent back to the creator for correction; exited by resubmission.
    AdjustmentRequested,
    /// Payment settled. Terminal for the workflow.
    Paid,
}

impl CoverageStatus {
    /// The canonical stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageStatus::Pending => "pending",
            CoverageStatus::ApprovedStage1 => "approved_stage1",
            CoverageStatus::Approved => "approved",
            CoverageStatus::Rejected => "rejected",
            CoverageStatus::AdjustmentRequested => "adjustment_requested",
            CoverageStatus::Paid => "paid",
        }
    }

    /// Parse a stored status string.
    ///
    /// An unknown value means the row was corrupted outside the engine, so
    /// this surfaces as an internal error rather than a validation error.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(CoverageStatus::Pending),
            "approved_stage1" => Ok(CoverageStatus::ApprovedStage1),
            "approved" => Ok(CoverageStatus::Approved),
            "rejected" => Ok(CoverageStatus::Rejected),
            "adjustment_requested" => Ok(CoverageStatus::AdjustmentRequested),
            "paid" => Ok(CoverageStatus::Paid),
            other => Err(CoreError::Internal(format!(
                "Unknown coverage status '{other}'"
            ))),
        }
    }

    /// Terminal statuses admit no further engine-driven transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CoverageStatus::Rejected | CoverageStatus::Paid)
    }
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
