pub mod admin_repo;
pub mod report_repo;
pub mod session_repo;
pub mod steward_repo;

pub use admin_repo::AdminRepo;
pub use report_repo::ReportRepo;
pub use session_repo::SessionRepo;
pub use steward_repo::StewardRepo;
