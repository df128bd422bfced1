//! Steward routes (JWT authenticated except login).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{steward_auth, steward_reports};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(steward_auth::login))
        .route(
            "/reports",
            get(steward_reports::list_my_reports).post(steward_reports::create_report),
        )
        .route(
            "/reports/{id}",
            get(steward_reports::get_report).patch(steward_reports::update_report),
        )
}
