//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not meet the minimum requirement, so routes declare their coarse role
//! gate at the type level. The workflow engine additionally enforces the
//! status-sensitive rules (approval tiers, creator ownership) that a
//! route-level check cannot see.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use diaria_core::error::CoreError;
use diaria_core::roles::{
    ROLE_ADMIN, ROLE_APPROVER, ROLE_APPROVER_FINAL, ROLE_FINANCE, ROLE_SUPERVISOR,
};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `supervisor` or `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireSupervisor(pub AuthUser);

impl FromRequestParts<AppState> for RequireSupervisor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_SUPERVISOR {
            return Err(AppError::Core(CoreError::Forbidden(
                "Supervisor or Admin role required".into(),
            )));
        }
        Ok(RequireSupervisor(user))
    }
}

/// Requires one of the approver roles (either tier) or `admin`.
pub struct RequireApprover(pub AuthUser);

impl FromRequestParts<AppState> for RequireApprover {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN
            && user.role != ROLE_APPROVER
            && user.role != ROLE_APPROVER_FINAL
        {
            return Err(AppError::Core(CoreError::Forbidden(
                "Approver or Admin role required".into(),
            )));
        }
        Ok(RequireApprover(user))
    }
}

/// Requires the `finance` or `admin` role.
pub struct RequireFinance(pub AuthUser);

impl FromRequestParts<AppState> for RequireFinance {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_FINANCE {
            return Err(AppError::Core(CoreError::Forbidden(
                "Finance or Admin role required".into(),
            )));
        }
        Ok(RequireFinance(user))
    }
}
