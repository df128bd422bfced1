//! Repository for the `admins` table.
//!
//! The system holds at most one admin. That invariant is enforced in SQL
//! (`INSERT ... WHERE NOT EXISTS`), not by a separate existence check, so
//! two concurrent bootstrap attempts cannot both succeed.

use aquareport_core::types::DbId;
use sqlx::PgPool;

use crate::models::admin::{Admin, CreateAdmin};

const COLUMNS: &str = "id, email, password_hash, name, last_login_at, created_at, updated_at";

/// Provides persistence operations for the admin account.
pub struct AdminRepo;

impl AdminRepo {
    /// Insert the admin account only if no admin exists yet.
    ///
    /// Returns `None` when an admin row is already present; of two
    /// concurrent bootstraps, at most one gets `Some`.
    pub async fn create_if_absent(
        pool: &PgPool,
        input: &CreateAdmin,
    ) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!(
            "INSERT INTO admins (email, password_hash, name) \
             SELECT $1, $2, $3 \
             WHERE NOT EXISTS (SELECT 1 FROM admins) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Whether the admin account has been bootstrapped yet.
    pub async fn exists(pool: &PgPool) -> Result<bool, sqlx::Error> {
        let (found,): (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM admins)")
            .fetch_one(pool)
            .await?;
        Ok(found)
    }

    /// Find the admin by email (login path).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE email = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find the admin by ID (session resolution).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE id = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Stamp a successful login.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE admins SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
