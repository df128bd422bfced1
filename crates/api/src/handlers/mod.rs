pub mod admin_auth;
pub mod admin_reports;
pub mod reports;
pub mod steward_auth;
pub mod steward_reports;
pub mod stewards;
