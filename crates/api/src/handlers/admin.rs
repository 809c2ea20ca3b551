//! Administrative handlers: full listing, out-of-band edits, and the
//! maintenance reset.

use axum::extract::{Path, Query, State};
use axum::Json;
use diaria_core::error::CoreError;
use diaria_core::status::CoverageStatus;
use diaria_core::types::DbId;
use diaria_db::models::coverage::{AdminEditCoverage, Coverage};
use diaria_db::repositories::{CoverageRepo, MaintenanceRepo, ResetSummary};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// `GET /admin/coverages` -- every coverage, optionally filtered by
/// status. An unknown status value is a 400, not an empty list.
pub async fn list_all_coverages(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<DataResponse<Vec<Coverage>>>> {
    if let Some(status) = &query.status {
        if CoverageStatus::parse(status).is_err() {
            return Err(CoreError::Validation(format!("Unknown status '{status}'")).into());
        }
    }
    let coverages = CoverageRepo::list_all(&state.pool, query.status.as_deref()).await?;
    Ok(Json(DataResponse { data: coverages }))
}

/// `PUT /admin/coverages/{id}` -- out-of-band field correction. Status
/// never changes; the audit trail records the touch.
pub async fn edit_coverage(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(fields): Json<AdminEditCoverage>,
) -> AppResult<Json<DataResponse<Coverage>>> {
    let coverage = state.engine.admin_edit(&user, id, &fields).await?;
    Ok(Json(DataResponse { data: coverage }))
}

/// `DELETE /admin/maintenance/reset` -- wipe all workflow data (coverages,
/// history, coverage attachments). Catalogs and users survive.
pub async fn maintenance_reset(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
) -> AppResult<Json<DataResponse<ResetSummary>>> {
    let summary = MaintenanceRepo::reset_all(&state.pool).await?;
    tracing::warn!(
        admin_id = user.user_id,
        coverages = summary.coverages_deleted,
        history = summary.history_deleted,
        attachments = summary.attachments_deleted,
        "Maintenance reset executed",
    );
    Ok(Json(DataResponse { data: summary }))
}
