//! Admin report oversight: filtered listing, assignment, and dashboard
//! statistics.

use aquareport_core::error::CoreError;
use aquareport_core::steward::STATUS_ACTIVE;
use aquareport_core::types::DbId;
use aquareport_db::models::report::{Report, ReportFilters};
use aquareport_db::repositories::{ReportRepo, StewardRepo};
use aquareport_db::{clamp_limit, page_offset};
use aquareport_notify::templates;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: i64 = 50;
const RECENT_REPORTS_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct AdminReportListParams {
    pub status: Option<String>,
    pub severity: Option<String>,
    pub issue_type: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// `GET /admin/reports` -- filtered report list plus global counters.
///
/// The `stats` block is always system-wide: filtering the list down to,
/// say, resolved reports must not change the pending counter shown next
/// to it.
pub async fn list_reports(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Query(params): Query<AdminReportListParams>,
) -> AppResult<Json<serde_json::Value>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT);
    let page = params.page.unwrap_or(1).max(1);
    let offset = page_offset(Some(page), limit);

    let filters = ReportFilters {
        status: params.status,
        severity: params.severity,
        issue_type: params.issue_type,
    };
    let reports = ReportRepo::list_filtered(&state.pool, &filters, limit, offset).await?;
    let total = ReportRepo::count_filtered(&state.pool, &filters).await?;
    let stats = ReportRepo::global_stats(&state.pool).await?;

    Ok(Json(json!({
        "data": reports,
        "total": total,
        "page": page,
        "limit": limit,
        "stats": stats,
    })))
}

/// `GET /admin/reports/{id}` -- a single report with its note trail.
pub async fn get_report(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let report = ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "report",
            id,
        })?;
    let notes = ReportRepo::notes_for(&state.pool, id).await?;
    Ok(Json(DataResponse::new(json!({
        "report": report,
        "notes": notes,
    }))))
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub steward_id: DbId,
}

/// `POST /admin/reports/{id}/assign` -- hand a pending report to a steward.
///
/// Assignment is a single conditional update: if the report is no longer
/// pending (e.g. another admin raced this one), the call fails with an
/// invalid-state conflict rather than silently reassigning.
pub async fn assign_report(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(report_id): Path<DbId>,
    Json(body): Json<AssignRequest>,
) -> AppResult<Json<DataResponse<Report>>> {
    let steward = StewardRepo::find_by_id(&state.pool, body.steward_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "steward",
            id: body.steward_id,
        })?;
    if steward.status != STATUS_ACTIVE {
        return Err(AppError::Core(CoreError::InvalidState(
            "Cannot assign to a steward whose account is not active".into(),
        )));
    }

    let assigned = ReportRepo::assign_if_pending(&state.pool, report_id, steward.id).await?;
    let report = match assigned {
        Some(report) => report,
        None => {
            // Distinguish "no such report" from "report already moved on".
            return match ReportRepo::find_by_id(&state.pool, report_id).await? {
                None => Err(AppError::Core(CoreError::NotFound {
                    entity: "report",
                    id: report_id,
                })),
                Some(existing) => Err(AppError::Core(CoreError::InvalidState(format!(
                    "Report is {} and can no longer be assigned",
                    existing.status
                )))),
            };
        }
    };

    // Both notifications are best-effort; assignment has already committed.
    let (subject, body_html) = templates::citizen_assignment(
        &report.reporter_name,
        &report.tracking_number,
        &steward.name,
    );
    state
        .notifier
        .send_best_effort(report.reporter_email.clone(), subject, body_html);

    let (subject, body_html) = templates::steward_assignment(
        &steward.name,
        &report.tracking_number,
        &report.issue_type,
        &report.location,
        &report.severity,
    );
    state
        .notifier
        .send_best_effort(steward.email.clone(), subject, body_html);

    tracing::info!(
        report_id = report.id,
        steward_id = steward.id,
        "report assigned"
    );
    Ok(Json(DataResponse::new(report)))
}

/// `GET /admin/stats` -- dashboard aggregates.
pub async fn dashboard_stats(
    State(state): State<AppState>,
    _admin: AdminAuth,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let stats = ReportRepo::global_stats(&state.pool).await?;
    let by_status = ReportRepo::status_breakdown(&state.pool).await?;
    let recent = ReportRepo::recent(&state.pool, RECENT_REPORTS_LIMIT).await?;
    let resolved_last_week =
        ReportRepo::resolved_since(&state.pool, Utc::now() - Duration::days(7)).await?;
    let steward_count = StewardRepo::count(&state.pool).await?;

    let by_status: serde_json::Map<String, serde_json::Value> = by_status
        .into_iter()
        .map(|(status, count)| (status, json!(count)))
        .collect();

    let active_issues = stats.pending + stats.in_progress;
    Ok(Json(DataResponse::new(json!({
        "reports": stats,
        "active_issues": active_issues,
        "by_status": by_status,
        "recent_reports": recent,
        "resolved_last_week": resolved_last_week,
        "steward_count": steward_count,
    }))))
}
