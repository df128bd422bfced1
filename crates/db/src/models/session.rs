//! Admin session model. The cookie carries an opaque token; only its
//! SHA-256 hash is stored here.

use aquareport_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `admin_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct AdminSession {
    pub id: DbId,
    pub admin_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new admin session.
#[derive(Debug)]
pub struct CreateAdminSession {
    pub admin_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
