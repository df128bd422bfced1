//! Route table assembly.

pub mod admin;
pub mod health;
pub mod reports;
pub mod steward;

use axum::Router;

use crate::state::AppState;

/// Assemble all API v1 routes.
///
/// Route tree (mounted under `/api/v1`):
///
/// ```text
/// /reports                      POST  citizen submission (multipart)
/// /reports                      GET   tracking-number lookup
/// /admin/exists                 GET   admin bootstrap state (public)
/// /admin/signup                 POST  one-shot admin bootstrap
/// /admin/login                  POST  admin login (session cookie)
/// /admin/logout                 POST  revoke session
/// /admin/me                     GET   authenticated admin profile
/// /admin/reports                GET   filtered list + global stats
/// /admin/reports/{id}           GET   report with notes
/// /admin/reports/{id}/assign    POST  assign pending report to steward
/// /admin/stats                  GET   dashboard aggregates
/// /admin/stewards               POST  provision steward
/// /admin/stewards               GET   steward roster
/// /admin/stewards/{id}          GET   steward detail
/// /admin/stewards/{id}          PATCH partial profile update
/// /admin/stewards/{id}          DELETE remove steward
/// /steward/login                POST  steward login (JWT)
/// /steward/reports              POST  steward field submission
/// /steward/reports              GET   reports filed by this steward
/// /steward/reports/{id}         GET   accessible report with notes
/// /steward/reports/{id}         PATCH progress update (multipart)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(reports::router())
        .nest("/admin", admin::router())
        .nest("/steward", steward::router())
}
