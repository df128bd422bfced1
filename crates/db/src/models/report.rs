//! Report entity model and DTOs.

use aquareport_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full report row from the `reports` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Report {
    pub id: DbId,
    /// Public citizen-facing identifier; immutable and globally unique.
    pub tracking_number: String,
    pub category: String,
    pub issue_type: String,
    pub location: String,
    pub description: String,
    pub severity: String,
    pub ward: String,
    pub landmark: String,
    pub reporter_name: String,
    pub reporter_phone: String,
    pub reporter_email: String,
    pub image_url: Option<String>,
    pub status: String,
    pub assigned_to: Option<DbId>,
    pub assigned_at: Option<Timestamp>,
    /// Set only when a steward filed the report on a citizen's behalf.
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A single entry in a report's append-only note trail.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReportNote {
    pub id: DbId,
    pub report_id: DbId,
    pub message: String,
    /// Display label of the author (steward name or employee ID).
    pub created_by: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

/// A report together with its note trail, as returned by read endpoints.
#[derive(Debug, Serialize)]
pub struct ReportWithNotes {
    #[serde(flatten)]
    pub report: Report,
    pub notes: Vec<ReportNote>,
}

/// DTO for inserting a new report.
#[derive(Debug)]
pub struct CreateReport {
    pub tracking_number: String,
    pub category: String,
    pub issue_type: String,
    pub location: String,
    pub description: String,
    pub severity: String,
    pub ward: String,
    pub landmark: String,
    pub reporter_name: String,
    pub reporter_phone: String,
    pub reporter_email: String,
    pub image_url: Option<String>,
    pub created_by: Option<DbId>,
}

/// DTO for appending a note to a report's trail.
#[derive(Debug)]
pub struct AppendNote {
    pub report_id: DbId,
    pub message: String,
    pub created_by: String,
    pub image_url: Option<String>,
}

/// Optional filters for the admin report list. The literal value `all`
/// (or absence) means unfiltered.
#[derive(Debug, Default, Deserialize)]
pub struct ReportFilters {
    pub status: Option<String>,
    pub severity: Option<String>,
    pub issue_type: Option<String>,
}

impl ReportFilters {
    /// Normalize a filter value: `None` and `"all"` both mean no filter.
    pub fn active(value: &Option<String>) -> Option<&str> {
        match value.as_deref() {
            None | Some("all") => None,
            Some(v) => Some(v),
        }
    }
}

/// Global report counts shown on the admin dashboard. Always system-wide,
/// never scoped to the active list filter.
#[derive(Debug, Serialize, FromRow)]
pub struct ReportStats {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub high_severity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_all_means_unfiltered() {
        assert_eq!(ReportFilters::active(&None), None);
        assert_eq!(ReportFilters::active(&Some("all".into())), None);
        assert_eq!(
            ReportFilters::active(&Some("pending".into())),
            Some("pending")
        );
    }
}
