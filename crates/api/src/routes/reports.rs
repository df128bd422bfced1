//! Public report routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/reports",
        get(reports::lookup_report).post(reports::submit_report),
    )
}
