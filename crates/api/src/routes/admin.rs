//! Admin routes (session-cookie authenticated except signup/login).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{admin_auth, admin_reports, stewards};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/exists", get(admin_auth::exists))
        .route("/signup", post(admin_auth::signup))
        .route("/login", post(admin_auth::login))
        .route("/logout", post(admin_auth::logout))
        .route("/me", get(admin_auth::me))
        .route("/reports", get(admin_reports::list_reports))
        .route("/reports/{id}", get(admin_reports::get_report))
        .route("/reports/{id}/assign", post(admin_reports::assign_report))
        .route("/stats", get(admin_reports::dashboard_stats))
        .route(
            "/stewards",
            get(stewards::list_stewards).post(stewards::create_steward),
        )
        .route(
            "/stewards/{id}",
            get(stewards::get_steward)
                .patch(stewards::update_steward)
                .delete(stewards::delete_steward),
        )
}
