use diaria_core::workflow::ApprovalStages;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have sensible defaults suitable for
/// local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Workflow behaviour toggles.
    pub workflow: WorkflowConfig,
}

/// Workflow behaviour configuration.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowConfig {
    /// How many approval tiers a coverage must clear (default: one).
    pub approval_stages: ApprovalStages,
    /// Whether the same-day double-booking rule is enforced at creation
    /// and resubmission (default: on).
    pub double_booking_check: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `APPROVAL_STAGES`      | `1`                        |
    /// | `DOUBLE_BOOKING_CHECK` | `true`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            workflow: WorkflowConfig::from_env(),
        }
    }
}

impl WorkflowConfig {
    /// Load the workflow toggles from environment variables.
    pub fn from_env() -> Self {
        let stage_count: u8 = std::env::var("APPROVAL_STAGES")
            .unwrap_or_else(|_| "1".into())
            .parse()
            .expect("APPROVAL_STAGES must be a number");
        let approval_stages = ApprovalStages::from_count(stage_count)
            .expect("APPROVAL_STAGES must be 1 or 2");

        let double_booking_check: bool = std::env::var("DOUBLE_BOOKING_CHECK")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("DOUBLE_BOOKING_CHECK must be true or false");

        Self {
            approval_stages,
            double_booking_check,
        }
    }
}
