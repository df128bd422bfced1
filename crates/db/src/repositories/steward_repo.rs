//! Repository for the `stewards` table.

use aquareport_core::steward::STATUS_ACTIVE;
use aquareport_core::types::DbId;
use sqlx::PgPool;

use crate::models::steward::{CreateSteward, Steward, StewardFilters, UpdateSteward};

const COLUMNS: &str = "\
    id, employee_id, name, email, phone, address, department, position, \
    date_hired, status, password_hash, last_login_at, created_by, \
    can_view_reports, can_create_reports, can_update_reports, can_delete_reports, \
    created_at, updated_at";

/// Provides persistence operations for stewards.
pub struct StewardRepo;

impl StewardRepo {
    /// Insert a new steward, returning the full row.
    ///
    /// Employee-ID uniqueness is enforced by `uq_stewards_employee_id`;
    /// on a collision the provisioning handler retries with the next
    /// candidate. A NULL `date_hired` falls back to the column default.
    pub async fn create(pool: &PgPool, input: &CreateSteward) -> Result<Steward, sqlx::Error> {
        let query = format!(
            "INSERT INTO stewards \
                (employee_id, name, email, phone, address, department, position, \
                 date_hired, password_hash, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, NOW()), $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Steward>(&query)
            .bind(&input.employee_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.department)
            .bind(&input.position)
            .bind(input.date_hired)
            .bind(&input.password_hash)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a steward by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Steward>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stewards WHERE id = $1");
        sqlx::query_as::<_, Steward>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active steward by employee ID (login path). Inactive and
    /// suspended stewards are invisible here so their credentials stop
    /// working the moment the status flips.
    pub async fn find_active_by_employee_id(
        pool: &PgPool,
        employee_id: &str,
    ) -> Result<Option<Steward>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stewards WHERE employee_id = $1 AND status = $2");
        sqlx::query_as::<_, Steward>(&query)
            .bind(employee_id)
            .bind(STATUS_ACTIVE)
            .fetch_optional(pool)
            .await
    }

    /// List stewards with optional department/status filters, newest first.
    pub async fn list_filtered(
        pool: &PgPool,
        filters: &StewardFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Steward>, sqlx::Error> {
        let (where_clause, binds) = Self::filter_clause(filters);
        let query = format!(
            "SELECT {COLUMNS} FROM stewards {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${} OFFSET ${}",
            binds.len() + 1,
            binds.len() + 2
        );

        let mut q = sqlx::query_as::<_, Steward>(&query);
        for value in &binds {
            q = q.bind(value);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count stewards matching the same filters as [`Self::list_filtered`].
    pub async fn count_filtered(
        pool: &PgPool,
        filters: &StewardFilters,
    ) -> Result<i64, sqlx::Error> {
        let (where_clause, binds) = Self::filter_clause(filters);
        let query = format!("SELECT COUNT(*) FROM stewards {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for value in &binds {
            q = q.bind(value);
        }
        q.fetch_one(pool).await
    }

    /// Total number of stewards (seed for employee-ID generation).
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stewards")
            .fetch_one(pool)
            .await
    }

    /// Apply a partial profile update. Returns the updated row if found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSteward,
    ) -> Result<Option<Steward>, sqlx::Error> {
        let query = format!(
            "UPDATE stewards SET \
                name = COALESCE($1, name), \
                email = COALESCE($2, email), \
                phone = COALESCE($3, phone), \
                address = COALESCE($4, address), \
                department = COALESCE($5, department), \
                position = COALESCE($6, position), \
                status = COALESCE($7, status), \
                can_update_reports = COALESCE($8, can_update_reports), \
                can_delete_reports = COALESCE($9, can_delete_reports) \
             WHERE id = $10 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Steward>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.department)
            .bind(&input.position)
            .bind(&input.status)
            .bind(input.can_update_reports)
            .bind(input.can_delete_reports)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a steward. Returns true if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stewards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Stamp a successful login.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE stewards SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    fn filter_clause(filters: &StewardFilters) -> (String, Vec<String>) {
        let mut conditions: Vec<String> = Vec::new();
        let mut binds: Vec<String> = Vec::new();

        for (column, value) in [
            ("department", Self::active(&filters.department)),
            ("status", Self::active(&filters.status)),
        ] {
            if let Some(v) = value {
                binds.push(v.to_string());
                conditions.push(format!("{column} = ${}", binds.len()));
            }
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        (where_clause, binds)
    }

    /// `None` and the sentinel `all` both mean unfiltered.
    fn active(value: &Option<String>) -> Option<&str> {
        match value.as_deref() {
            None | Some("all") => None,
            Some(v) => Some(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_clause_skips_all_sentinel() {
        let filters = StewardFilters {
            department: Some("all".into()),
            status: Some("Active".into()),
        };
        let (clause, binds) = StewardRepo::filter_clause(&filters);
        assert_eq!(clause, "WHERE status = $1");
        assert_eq!(binds, vec!["Active".to_string()]);
    }
}
