//! Steward login.

use aquareport_core::error::CoreError;
use aquareport_db::models::steward::StewardResponse;
use aquareport_db::repositories::StewardRepo;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth::jwt::generate_steward_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StewardLoginRequest {
    pub employee_id: String,
    pub password: String,
}

/// `POST /steward/login` -- exchange employee ID + password for a JWT.
///
/// Employee IDs are case-insensitive on input. Unknown IDs, wrong
/// passwords, and non-active accounts all yield the same error message.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<StewardLoginRequest>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid employee ID or password".into(),
        ))
    };

    let employee_id = body.employee_id.trim().to_uppercase();
    let steward = StewardRepo::find_active_by_employee_id(&state.pool, &employee_id)
        .await?
        .ok_or_else(invalid)?;

    let ok = verify_password(&body.password, &steward.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !ok {
        return Err(invalid());
    }

    StewardRepo::record_login(&state.pool, steward.id).await?;

    let token = generate_steward_token(steward.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Failed to issue token: {e}")))?;

    tracing::info!(steward_id = steward.id, "steward logged in");
    Ok(Json(DataResponse::new(json!({
        "token": token,
        "steward": StewardResponse::from(steward),
    }))))
}
