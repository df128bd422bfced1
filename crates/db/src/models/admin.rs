//! Admin entity model and DTOs. The system holds at most one admin row.

use aquareport_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full admin row from the `admins` table.
///
/// Contains the password hash -- use [`AdminResponse`] for API output.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe admin representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct AdminResponse {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<Admin> for AdminResponse {
    fn from(a: Admin) -> Self {
        AdminResponse {
            id: a.id,
            email: a.email,
            name: a.name,
            last_login_at: a.last_login_at,
            created_at: a.created_at,
        }
    }
}

/// DTO for the one-shot admin bootstrap.
#[derive(Debug)]
pub struct CreateAdmin {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}
