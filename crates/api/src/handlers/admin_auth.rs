//! Admin bootstrap, login, logout, and session introspection.
//!
//! The system holds exactly one admin account; the bootstrap endpoint is a
//! conditional insert so concurrent signups cannot create two.

use aquareport_core::error::CoreError;
use aquareport_core::steward::{validate_email, validate_text_field, MAX_NAME_LEN};
use aquareport_db::models::admin::{AdminResponse, CreateAdmin};
use aquareport_db::models::session::CreateAdminSession;
use aquareport_db::repositories::{AdminRepo, SessionRepo};
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::auth::session::{generate_session_token, SESSION_COOKIE};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Minimum admin password length at bootstrap.
const MIN_ADMIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// `POST /admin/signup` -- one-shot admin bootstrap.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AdminResponse>>)> {
    validate_text_field("name", &body.name, MAX_NAME_LEN)?;
    validate_email(&body.email)?;
    validate_password_strength(&body.password, MIN_ADMIN_PASSWORD_LEN)
        .map_err(CoreError::Validation)?;

    let password_hash = hash_password(&body.password)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {e}")))?;

    let input = CreateAdmin {
        email: body.email.trim().to_lowercase(),
        password_hash,
        name: body.name.trim().to_string(),
    };

    let admin = AdminRepo::create_if_absent(&state.pool, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict("Admin account already exists".into()))
        })?;

    tracing::info!(admin_id = admin.id, "admin account bootstrapped");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(AdminResponse::from(admin))),
    ))
}

/// `GET /admin/exists` -- public probe for whether the admin account has
/// been bootstrapped, so a setup screen knows to offer signup or login.
pub async fn exists(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let admin_exists = AdminRepo::exists(&state.pool).await?;
    Ok(Json(DataResponse::new(
        serde_json::json!({ "admin_exists": admin_exists }),
    )))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /admin/login` -- sets the `admin_session` cookie on success.
///
/// Invalid email and invalid password return the same message so the
/// endpoint cannot be used to probe for the admin's address.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<(HeaderMap, Json<DataResponse<AdminResponse>>)> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let admin = AdminRepo::find_by_email(&state.pool, &body.email.trim().to_lowercase())
        .await?
        .ok_or_else(invalid)?;

    let ok = verify_password(&body.password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !ok {
        return Err(invalid());
    }

    let expiry_hours = state.config.admin_session_expiry_hours;
    let (token, token_hash) = generate_session_token();
    SessionRepo::create(
        &state.pool,
        &CreateAdminSession {
            admin_id: admin.id,
            token_hash,
            expires_at: Utc::now() + Duration::hours(expiry_hours),
        },
    )
    .await?;
    AdminRepo::record_login(&state.pool, admin.id).await?;

    // Opportunistic cleanup of long-expired sessions; a failure here must
    // not fail the login.
    if let Err(err) = SessionRepo::cleanup_expired(&state.pool).await {
        tracing::warn!(error = %err, "expired session cleanup failed");
    }

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        session_cookie_header(&token, expiry_hours * 3600)?,
    );

    tracing::info!(admin_id = admin.id, "admin logged in");
    Ok((headers, Json(DataResponse::new(AdminResponse::from(admin)))))
}

/// `POST /admin/logout` -- revokes the presented session and clears the cookie.
pub async fn logout(
    State(state): State<AppState>,
    admin: AdminAuth,
) -> AppResult<(HeaderMap, Json<DataResponse<serde_json::Value>>)> {
    SessionRepo::revoke(&state.pool, &admin.token_hash).await?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, session_cookie_header("", 0)?);

    tracing::info!(admin_id = admin.admin_id, "admin logged out");
    Ok((
        headers,
        Json(DataResponse::new(serde_json::json!({ "logged_out": true }))),
    ))
}

/// `GET /admin/me` -- the authenticated admin's profile.
pub async fn me(
    State(state): State<AppState>,
    admin: AdminAuth,
) -> AppResult<Json<DataResponse<AdminResponse>>> {
    let row = AdminRepo::find_by_id(&state.pool, admin.admin_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "admin",
            id: admin.admin_id,
        })?;
    Ok(Json(DataResponse::new(AdminResponse::from(row))))
}

/// Build the session Set-Cookie value. `max_age_secs = 0` clears the cookie.
fn session_cookie_header(token: &str, max_age_secs: i64) -> Result<HeaderValue, AppError> {
    let value = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; Path=/; Max-Age={max_age_secs}; SameSite=Lax"
    );
    HeaderValue::from_str(&value)
        .map_err(|e| AppError::InternalError(format!("Invalid cookie value: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_header_shape() {
        let header = session_cookie_header("abc-123", 86400).expect("valid header");
        let value = header.to_str().expect("ascii");
        assert!(value.starts_with("admin_session=abc-123;"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Max-Age=86400"));
    }

    #[test]
    fn clearing_cookie_uses_zero_max_age() {
        let header = session_cookie_header("", 0).expect("valid header");
        let value = header.to_str().expect("ascii");
        assert!(value.starts_with("admin_session=;"));
        assert!(value.contains("Max-Age=0"));
    }
}
