//! Authentication extractors for Axum handlers.
//!
//! Two audiences, two mechanisms:
//! - admins carry an opaque session cookie resolved against `admin_sessions`;
//! - stewards carry an HS256 bearer token checked against the live steward row,
//!   so a status change locks them out immediately regardless of token expiry.

use aquareport_core::error::CoreError;
use aquareport_core::steward::STATUS_ACTIVE;
use aquareport_core::types::DbId;
use aquareport_db::models::steward::Steward;
use aquareport_db::repositories::{AdminRepo, SessionRepo, StewardRepo};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::jwt::validate_steward_token;
use crate::auth::session::{hash_session_token, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated admin resolved from the `admin_session` cookie.
///
/// Use this as an extractor parameter in any handler that requires admin
/// access:
///
/// ```ignore
/// async fn my_handler(admin: AdminAuth) -> AppResult<Json<()>> {
///     tracing::info!(admin_id = admin.admin_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminAuth {
    /// The admin's internal database id.
    pub admin_id: DbId,
    /// Hash of the presented session token (used by logout to revoke it).
    pub token_hash: String,
}

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_cookie(parts).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing admin session".into()))
        })?;

        let token_hash = hash_session_token(&token);
        let session = SessionRepo::find_valid_by_token_hash(&state.pool, &token_hash)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
            })?;

        // The session row may outlive the admin account in edge cases;
        // resolve the admin to be sure.
        AdminRepo::find_by_id(&state.pool, session.admin_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
            })?;

        Ok(AdminAuth {
            admin_id: session.admin_id,
            token_hash,
        })
    }
}

/// Authenticated steward resolved from a JWT bearer token.
///
/// The steward row is re-fetched on every request: a token for a steward
/// who has since been suspended or removed is rejected even if the JWT
/// itself is still valid.
#[derive(Debug, Clone)]
pub struct StewardAuth {
    pub steward: Steward,
}

impl FromRequestParts<AppState> for StewardAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_steward_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let steward = StewardRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
            })?;

        if steward.status != STATUS_ACTIVE {
            return Err(AppError::Core(CoreError::Forbidden(
                "Steward account is not active".into(),
            )));
        }

        Ok(StewardAuth { steward })
    }
}

/// Pull the session token out of the `Cookie` header, if present.
fn session_cookie(parts: &Parts) -> Option<String> {
    let header = parts.headers.get("cookie")?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_cookie(value: &str) -> Parts {
        let request = Request::builder()
            .header("cookie", value)
            .body(())
            .expect("request builds");
        request.into_parts().0
    }

    #[test]
    fn session_cookie_found_among_others() {
        let parts = parts_with_cookie("theme=dark; admin_session=abc-123; lang=en");
        assert_eq!(session_cookie(&parts), Some("abc-123".to_string()));
    }

    #[test]
    fn session_cookie_missing() {
        let parts = parts_with_cookie("theme=dark");
        assert_eq!(session_cookie(&parts), None);
    }
}
