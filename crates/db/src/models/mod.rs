pub mod attachment;
pub mod catalog;
pub mod coverage;
pub mod history;
pub mod notification;
pub mod user;
