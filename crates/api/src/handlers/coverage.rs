//! Coverage handlers: the supervisor-facing surface.
//!
//! Creation and resubmission go through the workflow engine; reads come
//! straight from the repositories. Access to a single record is limited
//! to its creator and administrators.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use diaria_core::error::CoreError;
use diaria_core::roles::{ROLE_ADMIN, ROLE_SUPERVISOR};
use diaria_core::types::DbId;
use diaria_db::models::coverage::{Coverage, CoverageInput};
use diaria_db::models::history::WorkflowHistoryEntry;
use diaria_db::repositories::{CoverageRepo, HistoryRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireSupervisor;
use crate::response::DataResponse;
use crate::state::AppState;

/// `POST /coverages` -- log a new coverage. Starts in `pending`.
pub async fn create_coverage(
    State(state): State<AppState>,
    RequireSupervisor(user): RequireSupervisor,
    Json(input): Json<CoverageInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Coverage>>)> {
    let coverage = state.engine.create(&user, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: coverage })))
}

/// `GET /coverages` -- the caller's own coverages, newest first.
/// Admins see everything.
pub async fn list_coverages(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Coverage>>>> {
    let coverages = if user.role == ROLE_ADMIN {
        CoverageRepo::list_all(&state.pool, None).await?
    } else {
        CoverageRepo::list_by_supervisor(&state.pool, user.user_id).await?
    };
    Ok(Json(DataResponse { data: coverages }))
}

/// `GET /coverages/{id}` -- one coverage, creator or admin only.
pub async fn get_coverage(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Coverage>>> {
    let coverage = find_accessible(&state, &user, id).await?;
    Ok(Json(DataResponse { data: coverage }))
}

/// `POST /coverages/{id}/resubmit` -- correct and resubmit a coverage
/// that was sent back for adjustment.
pub async fn resubmit_coverage(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CoverageInput>,
) -> AppResult<Json<DataResponse<Coverage>>> {
    let coverage = state.engine.resubmit(&user, id, &input).await?;
    Ok(Json(DataResponse { data: coverage }))
}

/// `GET /coverages/{id}/history` -- the audit trail, oldest entry first.
/// Same visibility rule as the record itself, except approvers and
/// finance also see it (they act on the record).
pub async fn coverage_history(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<WorkflowHistoryEntry>>>> {
    if user.role == ROLE_SUPERVISOR {
        // Supervisors only see trails of their own records.
        find_accessible(&state, &user, id).await?;
    } else {
        CoverageRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Coverage",
                id,
            })?;
    }
    let entries = HistoryRepo::list_for_coverage(&state.pool, id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// Fetch a coverage and enforce the creator-or-admin visibility rule.
async fn find_accessible(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Coverage> {
    let coverage = CoverageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Coverage",
            id,
        })?;
    if user.role != ROLE_ADMIN && coverage.supervisor_id != user.user_id {
        return Err(CoreError::Forbidden("Not your coverage".into()).into());
    }
    Ok(coverage)
}
