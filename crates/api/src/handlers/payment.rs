//! Payment handlers: the finance-facing surface.

use axum::extract::{Path, State};
use axum::Json;
use diaria_core::types::DbId;
use diaria_db::models::catalog::PaymentMethod;
use diaria_db::models::coverage::{AttachmentRef, Coverage, PaymentDetails};
use diaria_db::repositories::{CatalogRepo, CoverageRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::rbac::RequireFinance;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PayRequest {
    #[serde(flatten)]
    pub details: PaymentDetails,
    /// Optional receipt already stored by the upload surface.
    pub receipt: Option<AttachmentRef>,
}

/// Payable listing plus the active payment methods the payer may choose
/// from, so the payment form needs one request.
#[derive(Debug, Serialize)]
pub struct PayableResponse {
    pub coverages: Vec<Coverage>,
    pub payment_methods: Vec<PaymentMethod>,
}

/// `GET /payments/payable` -- fully approved coverages awaiting payment,
/// oldest work date first.
pub async fn list_payable(
    State(state): State<AppState>,
    RequireFinance(_user): RequireFinance,
) -> AppResult<Json<DataResponse<PayableResponse>>> {
    let coverages = CoverageRepo::list_payable(&state.pool).await?;
    let payment_methods = CatalogRepo::list_active_payment_methods(&state.pool).await?;
    Ok(Json(DataResponse {
        data: PayableResponse {
            coverages,
            payment_methods,
        },
    }))
}

/// `POST /payments/{id}/pay` -- settle payment for an approved coverage.
pub async fn pay_coverage(
    State(state): State<AppState>,
    RequireFinance(user): RequireFinance,
    Path(id): Path<DbId>,
    Json(req): Json<PayRequest>,
) -> AppResult<Json<DataResponse<Coverage>>> {
    let coverage = state
        .engine
        .pay(&user, id, &req.details, req.receipt.as_ref())
        .await?;
    Ok(Json(DataResponse { data: coverage }))
}
