//! HTTP layer: configuration, authentication, the workflow engine, and
//! the axum router. The binary entry point lives in `main.rs`.

pub mod auth;
pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notifications;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
