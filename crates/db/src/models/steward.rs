//! Steward entity model and DTOs.

use aquareport_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full steward row from the `stewards` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`StewardResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Steward {
    pub id: DbId,
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub department: String,
    pub position: String,
    pub date_hired: Timestamp,
    pub status: String,
    pub password_hash: String,
    pub last_login_at: Option<Timestamp>,
    pub created_by: DbId,
    pub can_view_reports: bool,
    pub can_create_reports: bool,
    pub can_update_reports: bool,
    pub can_delete_reports: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe steward representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct StewardResponse {
    pub id: DbId,
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub department: String,
    pub position: String,
    pub date_hired: Timestamp,
    pub status: String,
    pub last_login_at: Option<Timestamp>,
    pub can_view_reports: bool,
    pub can_create_reports: bool,
    pub can_update_reports: bool,
    pub can_delete_reports: bool,
    pub created_at: Timestamp,
}

impl From<Steward> for StewardResponse {
    fn from(s: Steward) -> Self {
        StewardResponse {
            id: s.id,
            employee_id: s.employee_id,
            name: s.name,
            email: s.email,
            phone: s.phone,
            address: s.address,
            department: s.department,
            position: s.position,
            date_hired: s.date_hired,
            status: s.status,
            last_login_at: s.last_login_at,
            can_view_reports: s.can_view_reports,
            can_create_reports: s.can_create_reports,
            can_update_reports: s.can_update_reports,
            can_delete_reports: s.can_delete_reports,
            created_at: s.created_at,
        }
    }
}

/// DTO for inserting a new steward (employee ID and password hash are
/// resolved by the provisioning handler before insert).
#[derive(Debug)]
pub struct CreateSteward {
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub department: String,
    pub position: String,
    pub date_hired: Option<Timestamp>,
    pub password_hash: String,
    pub created_by: DbId,
}

/// DTO for updating a steward profile. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateSteward {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: Option<String>,
    pub can_update_reports: Option<bool>,
    pub can_delete_reports: Option<bool>,
}

/// Optional filters for the admin steward list (`all` means unfiltered).
#[derive(Debug, Default, Deserialize)]
pub struct StewardFilters {
    pub department: Option<String>,
    pub status: Option<String>,
}
