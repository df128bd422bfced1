//! Repository for the `admin_sessions` table.
//!
//! Sessions are opaque tokens held by the browser; rows store only the
//! SHA-256 hash, so a database leak does not leak usable cookies.

use sqlx::PgPool;

use crate::models::session::{AdminSession, CreateAdminSession};

const COLUMNS: &str = "id, admin_id, token_hash, expires_at, is_revoked, created_at";

/// Provides persistence operations for admin sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Record a new session.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAdminSession,
    ) -> Result<AdminSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_sessions (admin_id, token_hash, expires_at) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(input.admin_id)
            .bind(&input.token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Resolve a live session by token hash. Expired and revoked sessions
    /// are excluded at the query level.
    pub async fn find_valid_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<AdminSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM admin_sessions \
             WHERE token_hash = $1 AND is_revoked = FALSE AND expires_at > NOW()"
        );
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single session (logout).
    pub async fn revoke(pool: &PgPool, token_hash: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE admin_sessions SET is_revoked = TRUE \
             WHERE token_hash = $1 AND is_revoked = FALSE",
        )
        .bind(token_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete sessions that expired more than a day ago. Ran
    /// opportunistically at login; there is no background sweeper.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM admin_sessions WHERE expires_at < NOW() - INTERVAL '1 day'")
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}
