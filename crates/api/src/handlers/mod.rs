pub mod admin;
pub mod approval;
pub mod auth;
pub mod coverage;
pub mod payment;
