mod attachment_repo;
mod catalog_repo;
mod coverage_repo;
mod history_repo;
mod maintenance_repo;
mod notification_repo;
mod user_repo;

pub use attachment_repo::AttachmentRepo;
pub use catalog_repo::CatalogRepo;
pub use coverage_repo::CoverageRepo;
pub use history_repo::HistoryRepo;
pub use maintenance_repo::{MaintenanceRepo, ResetSummary};
pub use notification_repo::NotificationRepo;
pub use user_repo::UserRepo;
