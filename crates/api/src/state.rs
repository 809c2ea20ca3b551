use std::sync::Arc;

use crate::config::ServerConfig;
use crate::engine::WorkflowEngine;

/// Shared application state available to all axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: diaria_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// The coverage workflow engine.
    pub engine: Arc<WorkflowEngine>,
}

impl AppState {
    /// Assemble the state from a pool and configuration.
    pub fn new(pool: diaria_db::DbPool, config: ServerConfig) -> Self {
        let engine = Arc::new(WorkflowEngine::new(pool.clone(), config.workflow));
        Self {
            pool,
            config: Arc::new(config),
            engine,
        }
    }
}
