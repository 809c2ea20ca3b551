//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint on the `users`
//! table.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPERVISOR: &str = "supervisor";
pub const ROLE_APPROVER: &str = "approver";
pub const ROLE_APPROVER_FINAL: &str = "approver_final";
pub const ROLE_FINANCE: &str = "finance";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[
    ROLE_ADMIN,
    ROLE_SUPERVISOR,
    ROLE_APPROVER,
    ROLE_APPROVER_FINAL,
    ROLE_FINANCE,
];

/// Check whether a role string is one of the known roles.
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}
