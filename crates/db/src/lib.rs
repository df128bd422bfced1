//! PostgreSQL persistence for aquareport.
//!
//! Exposes the connection pool helpers, embedded migrations, row models
//! (`models`) and stateless repositories (`repositories`). Repositories
//! return `sqlx::Error`; the API layer classifies unique-constraint
//! violations into domain conflicts.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub mod models;
pub mod repositories;

/// Shared connection pool type used across the workspace.
pub type DbPool = PgPool;

/// Default maximum pool connections.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Hard ceiling for list queries regardless of what the caller asks for.
const MAX_PAGE_LIMIT: i64 = 100;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply embedded migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Clamp a caller-supplied page limit into `1..=MAX_PAGE_LIMIT`.
pub fn clamp_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, MAX_PAGE_LIMIT)
}

/// Convert a 1-based page number and limit into a non-negative offset.
pub fn page_offset(page: Option<i64>, limit: i64) -> i64 {
    (page.unwrap_or(1).max(1) - 1) * limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_bounds() {
        assert_eq!(clamp_limit(None, 50), 50);
        assert_eq!(clamp_limit(Some(10), 50), 10);
        assert_eq!(clamp_limit(Some(0), 50), 1);
        assert_eq!(clamp_limit(Some(-5), 50), 1);
        assert_eq!(clamp_limit(Some(10_000), 50), MAX_PAGE_LIMIT);
    }

    #[test]
    fn page_offset_is_one_based() {
        assert_eq!(page_offset(None, 50), 0);
        assert_eq!(page_offset(Some(1), 50), 0);
        assert_eq!(page_offset(Some(3), 50), 100);
        assert_eq!(page_offset(Some(0), 50), 0);
        assert_eq!(page_offset(Some(-2), 50), 0);
    }
}
