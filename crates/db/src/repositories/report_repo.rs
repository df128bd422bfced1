//! Repository for the `reports` and `report_notes` tables.
//!
//! Workflow preconditions that must hold under concurrency (assignment
//! requires the stored status to still be `pending`) are expressed as
//! conditional updates, never as read-then-write pairs.

use aquareport_core::report::{SEVERITY_HIGH, STATUS_IN_PROGRESS, STATUS_PENDING, STATUS_RESOLVED};
use aquareport_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::report::{
    AppendNote, CreateReport, Report, ReportFilters, ReportNote, ReportStats,
};

/// Column list for `reports` queries.
const COLUMNS: &str = "\
    id, tracking_number, category, issue_type, location, description, severity, \
    ward, landmark, reporter_name, reporter_phone, reporter_email, image_url, \
    status, assigned_to, assigned_at, created_by, created_at, updated_at";

/// Column list for `report_notes` queries.
const NOTE_COLUMNS: &str = "id, report_id, message, created_by, image_url, created_at";

/// Provides persistence operations for reports and their note trails.
pub struct ReportRepo;

impl ReportRepo {
    /// Insert a new report, returning the full row.
    ///
    /// A unique violation on `uq_reports_tracking_number` means the caller's
    /// generated tracking number collided; callers regenerate and retry.
    pub async fn create(pool: &PgPool, input: &CreateReport) -> Result<Report, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports \
                (tracking_number, category, issue_type, location, description, severity, \
                 ward, landmark, reporter_name, reporter_phone, reporter_email, image_url, \
                 created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(&input.tracking_number)
            .bind(&input.category)
            .bind(&input.issue_type)
            .bind(&input.location)
            .bind(&input.description)
            .bind(&input.severity)
            .bind(&input.ward)
            .bind(&input.landmark)
            .bind(&input.reporter_name)
            .bind(&input.reporter_phone)
            .bind(&input.reporter_email)
            .bind(&input.image_url)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a report by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1");
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a report by its public tracking number.
    pub async fn find_by_tracking(
        pool: &PgPool,
        tracking_number: &str,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE tracking_number = $1");
        sqlx::query_as::<_, Report>(&query)
            .bind(tracking_number)
            .fetch_optional(pool)
            .await
    }

    /// Atomically assign a pending report to a steward.
    ///
    /// The `status = 'pending'` predicate is the assignment precondition:
    /// of two concurrent assigns, exactly one matches and the other gets
    /// `None`, which the caller surfaces as an invalid-state error.
    pub async fn assign_if_pending(
        pool: &PgPool,
        report_id: DbId,
        steward_id: DbId,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "UPDATE reports \
             SET assigned_to = $1, status = '{STATUS_IN_PROGRESS}', assigned_at = NOW() \
             WHERE id = $2 AND status = '{STATUS_PENDING}' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(steward_id)
            .bind(report_id)
            .fetch_optional(pool)
            .await
    }

    /// Set the status of a report. Returns the updated row if found.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("UPDATE reports SET status = $1 WHERE id = $2 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Report>(&query)
            .bind(status)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Append a note to a report's trail. Notes are append-only: no update
    /// or delete operation exists on this table.
    pub async fn append_note(pool: &PgPool, input: &AppendNote) -> Result<ReportNote, sqlx::Error> {
        let query = format!(
            "INSERT INTO report_notes (report_id, message, created_by, image_url) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {NOTE_COLUMNS}"
        );
        sqlx::query_as::<_, ReportNote>(&query)
            .bind(input.report_id)
            .bind(&input.message)
            .bind(&input.created_by)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// List a report's notes in append order.
    pub async fn notes_for(pool: &PgPool, report_id: DbId) -> Result<Vec<ReportNote>, sqlx::Error> {
        let query = format!(
            "SELECT {NOTE_COLUMNS} FROM report_notes \
             WHERE report_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ReportNote>(&query)
            .bind(report_id)
            .fetch_all(pool)
            .await
    }

    /// List reports with optional status/severity/issue-type filters,
    /// newest first.
    pub async fn list_filtered(
        pool: &PgPool,
        filters: &ReportFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Report>, sqlx::Error> {
        let (where_clause, binds) = Self::filter_clause(filters);

        let query = format!(
            "SELECT {COLUMNS} FROM reports {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${} OFFSET ${}",
            binds.len() + 1,
            binds.len() + 2
        );

        let mut q = sqlx::query_as::<_, Report>(&query);
        for value in &binds {
            q = q.bind(value);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count reports matching the same filters as [`Self::list_filtered`].
    pub async fn count_filtered(
        pool: &PgPool,
        filters: &ReportFilters,
    ) -> Result<i64, sqlx::Error> {
        let (where_clause, binds) = Self::filter_clause(filters);
        let query = format!("SELECT COUNT(*) FROM reports {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for value in &binds {
            q = q.bind(value);
        }
        q.fetch_one(pool).await
    }

    /// Global dashboard counts. Deliberately independent of any list filter.
    pub async fn global_stats(pool: &PgPool) -> Result<ReportStats, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) AS total, \
                    COUNT(*) FILTER (WHERE status = '{STATUS_PENDING}') AS pending, \
                    COUNT(*) FILTER (WHERE status = '{STATUS_IN_PROGRESS}') AS in_progress, \
                    COUNT(*) FILTER (WHERE status = '{STATUS_RESOLVED}') AS resolved, \
                    COUNT(*) FILTER (WHERE severity = '{SEVERITY_HIGH}') AS high_severity \
             FROM reports"
        );
        sqlx::query_as::<_, ReportStats>(&query).fetch_one(pool).await
    }

    /// Count of reports resolved at or after `since` (dashboard widget).
    pub async fn resolved_since(pool: &PgPool, since: Timestamp) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reports WHERE status = $1 AND updated_at >= $2",
        )
        .bind(STATUS_RESOLVED)
        .bind(since)
        .fetch_one(pool)
        .await
    }

    /// Counts grouped by status (dashboard breakdown).
    pub async fn status_breakdown(pool: &PgPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM reports GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// The `limit` most recent reports, newest first.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports ORDER BY created_at DESC LIMIT $1");
        sqlx::query_as::<_, Report>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Reports created by a given steward, newest first.
    pub async fn list_created_by(
        pool: &PgPool,
        steward_id: DbId,
    ) -> Result<Vec<Report>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM reports WHERE created_by = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Report>(&query)
            .bind(steward_id)
            .fetch_all(pool)
            .await
    }

    /// Build the WHERE clause and bind values for list/count queries.
    fn filter_clause(filters: &ReportFilters) -> (String, Vec<String>) {
        let mut conditions: Vec<String> = Vec::new();
        let mut binds: Vec<String> = Vec::new();

        for (column, value) in [
            ("status", ReportFilters::active(&filters.status)),
            ("severity", ReportFilters::active(&filters.severity)),
            ("issue_type", ReportFilters::active(&filters.issue_type)),
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_clause_empty_when_unfiltered() {
        let (clause, binds) = ReportRepo::filter_clause(&ReportFilters::default());
        assert!(clause.is_empty());
        assert!(binds.is_empty());
    }

    #[test]
    fn filter_clause_numbers_placeholders_in_order() {
        let filters = ReportFilters {
            status: Some("pending".into()),
            severity: Some("all".into()),
            issue_type: Some("leak".into()),
        };
        let (clause, binds) = ReportRepo::filter_clause(&filters);
        assert_eq!(clause, "WHERE status = $1 AND issue_type = $2");
        assert_eq!(binds, vec!["pending".to_string(), "leak".to_string()]);
    }
}
