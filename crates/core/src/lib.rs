//! Pure domain layer for the coverage workflow: shared types, error
//! taxonomy, role constants, the coverage status enum, and the workflow
//! transition table. No I/O lives here.

pub mod error;
pub mod roles;
pub mod status;
pub mod types;
pub mod workflow;
