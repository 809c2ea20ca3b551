//! Approval handlers: queue listing and the approve / reject /
//! request-adjustment transitions.

use axum::extract::{Path, State};
use axum::Json;
use diaria_core::roles::{ROLE_APPROVER, ROLE_APPROVER_FINAL};
use diaria_core::status::CoverageStatus;
use diaria_core::types::DbId;
use diaria_core::workflow::ApprovalStages;
use diaria_db::models::coverage::{ApprovalQueueItem, Coverage};
use diaria_db::repositories::CoverageRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireApprover;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct AdjustmentRequest {
    pub note: String,
}

/// `GET /approvals/queue` -- the coverages awaiting the caller's tier.
///
/// In single-stage mode everything pending is one queue. In two-stage
/// mode first-tier approvers see `pending`, final approvers see
/// `approved_stage1`, and admins see both tiers merged in work-date
/// order.
pub async fn approval_queue(
    State(state): State<AppState>,
    RequireApprover(user): RequireApprover,
) -> AppResult<Json<DataResponse<Vec<ApprovalQueueItem>>>> {
    let statuses: &[CoverageStatus] = match state.engine.stages() {
        ApprovalStages::One => &[CoverageStatus::Pending],
        ApprovalStages::Two => match user.role.as_str() {
            ROLE_APPROVER => &[CoverageStatus::Pending],
            ROLE_APPROVER_FINAL => &[CoverageStatus::ApprovedStage1],
            _ => &[CoverageStatus::Pending, CoverageStatus::ApprovedStage1],
        },
    };

    let mut items = Vec::new();
    for status in statuses {
        items.extend(CoverageRepo::approval_queue(&state.pool, status.as_str()).await?);
    }
    if statuses.len() > 1 {
        items.sort_by(|a, b| (a.coverage_date, a.id).cmp(&(b.coverage_date, b.id)));
    }
    Ok(Json(DataResponse { data: items }))
}

/// `POST /approvals/{id}/approve` -- advance one approval tier.
pub async fn approve_coverage(
    State(state): State<AppState>,
    RequireApprover(user): RequireApprover,
    Path(id): Path<DbId>,
    Json(req): Json<ApproveRequest>,
) -> AppResult<Json<DataResponse<Coverage>>> {
    let coverage = state.engine.approve(&user, id, req.note.as_deref()).await?;
    Ok(Json(DataResponse { data: coverage }))
}

/// `POST /approvals/{id}/reject` -- reject with a mandatory reason.
pub async fn reject_coverage(
    State(state): State<AppState>,
    RequireApprover(user): RequireApprover,
    Path(id): Path<DbId>,
    Json(req): Json<RejectRequest>,
) -> AppResult<Json<DataResponse<Coverage>>> {
    let coverage = state.engine.reject(&user, id, &req.reason).await?;
    Ok(Json(DataResponse { data: coverage }))
}

/// `POST /approvals/{id}/request-adjustment` -- send back for correction.
pub async fn request_adjustment(
    State(state): State<AppState>,
    RequireApprover(user): RequireApprover,
    Path(id): Path<DbId>,
    Json(req): Json<AdjustmentRequest>,
) -> AppResult<Json<DataResponse<Coverage>>> {
    let coverage = state.engine.request_adjustment(&user, id, &req.note).await?;
    Ok(Json(DataResponse { data: coverage }))
}
