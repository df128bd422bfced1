pub mod admin;
pub mod report;
pub mod session;
pub mod steward;
