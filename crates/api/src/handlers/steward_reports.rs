//! Steward-facing report endpoints: field submissions, the steward's own
//! report list, and progress updates on assigned reports.

use aquareport_core::error::CoreError;
use aquareport_core::report::{self, CATEGORY_WATER, SEVERITY_MEDIUM};
use aquareport_core::steward::display_label;
use aquareport_core::types::DbId;
use aquareport_db::models::report::{
    AppendNote, CreateReport, Report, ReportWithNotes,
};
use aquareport_db::models::steward::Steward;
use aquareport_db::repositories::ReportRepo;
use aquareport_notify::templates;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::middleware::auth::StewardAuth;
use crate::response::DataResponse;
use crate::state::AppState;

const TRACKING_MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StewardReportRequest {
    pub issue_type: String,
    pub location: String,
    pub description: String,
    pub severity: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub ward: String,
    #[serde(default)]
    pub landmark: String,
    pub reporter_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// `POST /steward/reports` -- a steward files a report from the field.
///
/// Reporter contact details default to the steward's own, so follow-up
/// notifications still reach someone who can act on them.
pub async fn create_report(
    State(state): State<AppState>,
    auth: StewardAuth,
    Json(body): Json<StewardReportRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<serde_json::Value>>)> {
    report::validate_steward_draft(&body.issue_type, &body.location, &body.description)?;

    let severity = body
        .severity
        .clone()
        .unwrap_or_else(|| SEVERITY_MEDIUM.to_string());
    report::validate_severity(&severity)?;

    let category = body
        .category
        .clone()
        .unwrap_or_else(|| CATEGORY_WATER.to_string());
    report::validate_category(&category)?;

    let steward = &auth.steward;
    let created = insert_with_fresh_tracking(&state, &body, steward, &severity, &category).await?;

    tracing::info!(
        report_id = created.id,
        steward_id = steward.id,
        tracking_number = %created.tracking_number,
        "steward report submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(json!({
            "report_id": created.id,
            "tracking_number": created.tracking_number,
        }))),
    ))
}

async fn insert_with_fresh_tracking(
    state: &AppState,
    body: &StewardReportRequest,
    steward: &Steward,
    severity: &str,
    category: &str,
) -> Result<Report, AppError> {
    let mut attempt = 0;
    loop {
        let input = CreateReport {
            tracking_number: report::generate_tracking_number(),
            category: category.to_string(),
            issue_type: body.issue_type.clone(),
            location: body.location.clone(),
            description: body.description.clone(),
            severity: severity.to_string(),
            ward: body.ward.clone(),
            landmark: body.landmark.clone(),
            reporter_name: body
                .reporter_name
                .clone()
                .unwrap_or_else(|| steward.name.clone()),
            reporter_phone: body
                .phone_number
                .clone()
                .unwrap_or_else(|| steward.phone.clone()),
            reporter_email: body.email.clone().unwrap_or_else(|| steward.email.clone()),
            image_url: None,
            created_by: Some(steward.id),
        };
        match ReportRepo::create(&state.pool, &input).await {
            Ok(report) => return Ok(report),
            Err(err)
                if is_unique_violation(&err, "uq_reports_tracking_number")
                    && attempt + 1 < TRACKING_MAX_ATTEMPTS =>
            {
                attempt += 1;
                tracing::warn!(attempt, "tracking number collision, regenerating");
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// `GET /steward/reports` -- reports this steward filed.
pub async fn list_my_reports(
    State(state): State<AppState>,
    auth: StewardAuth,
) -> AppResult<Json<DataResponse<Vec<Report>>>> {
    let reports = ReportRepo::list_created_by(&state.pool, auth.steward.id).await?;
    Ok(Json(DataResponse::new(reports)))
}

/// `GET /steward/reports/{id}` -- a report this steward filed or is
/// assigned to, with its note trail.
pub async fn get_report(
    State(state): State<AppState>,
    auth: StewardAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ReportWithNotes>>> {
    let report = load_accessible_report(&state, &auth.steward, id).await?;
    let notes = ReportRepo::notes_for(&state.pool, report.id).await?;
    Ok(Json(DataResponse::new(ReportWithNotes { report, notes })))
}

/// Multipart fields accepted by the progress-update endpoint.
#[derive(Debug, Default)]
struct UpdateForm {
    status: Option<String>,
    note: Option<String>,
    image: Option<(String, Vec<u8>)>,
}

impl UpdateForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UpdateForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match name.as_str() {
                "image" => {
                    let file_name = field.file_name().unwrap_or("upload").to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Upload(format!("Failed to read image: {e}")))?;
                    if !bytes.is_empty() {
                        form.image = Some((file_name, bytes.to_vec()));
                    }
                }
                "status" => {
                    form.status = Some(field.text().await.map_err(|e| {
                        AppError::BadRequest(format!("Invalid status field: {e}"))
                    })?);
                }
                "note" => {
                    form.note = Some(field.text().await.map_err(|e| {
                        AppError::BadRequest(format!("Invalid note field: {e}"))
                    })?);
                }
                _ => {} // unknown fields are ignored
            }
        }
        Ok(form)
    }
}

/// `PATCH /steward/reports/{id}` -- record progress on a report.
///
/// Accepts any combination of a status change, a note, and an evidence
/// photo. Unlike the citizen submission path, a failed evidence upload is
/// logged and skipped: losing a photo must not block a status update made
/// from the field.
pub async fn update_report(
    State(state): State<AppState>,
    auth: StewardAuth,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<ReportWithNotes>>> {
    let form = UpdateForm::from_multipart(multipart).await?;
    let steward = &auth.steward;
    let report = load_accessible_report(&state, steward, id).await?;

    let new_status = match &form.status {
        Some(status) if *status != report.status => {
            report::validate_status(status)?;
            Some(status.clone())
        }
        _ => None,
    };

    let image_url = match &form.image {
        Some((file_name, bytes)) => {
            match state.blob_store.store(bytes.clone(), file_name).await {
                Ok(url) => Some(url),
                Err(err) => {
                    tracing::warn!(report_id = id, error = %err, "evidence upload failed, continuing");
                    None
                }
            }
        }
        None => None,
    };

    let note_text = form.note.as_deref().map(str::trim).unwrap_or("");
    if !note_text.is_empty() || image_url.is_some() {
        ReportRepo::append_note(
            &state.pool,
            &AppendNote {
                report_id: id,
                message: note_text.to_string(),
                created_by: display_label(&steward.name, &steward.employee_id),
                image_url: image_url.clone(),
            },
        )
        .await?;
    }

    let report = match &new_status {
        Some(status) => {
            let updated = ReportRepo::set_status(&state.pool, id, status)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "report",
                    id,
                })?;

            let (subject, html) = templates::status_change(
                &updated.reporter_name,
                &updated.tracking_number,
                &updated.status,
                (!note_text.is_empty()).then_some(note_text),
                image_url.as_deref(),
            );
            state
                .notifier
                .send_best_effort(updated.reporter_email.clone(), subject, html);

            tracing::info!(report_id = id, status = %updated.status, "report status updated");
            updated
        }
        None => report,
    };

    let notes = ReportRepo::notes_for(&state.pool, id).await?;
    Ok(Json(DataResponse::new(ReportWithNotes { report, notes })))
}

/// Fetch a report and check the steward may touch it: they must be the
/// assignee or the creator.
async fn load_accessible_report(
    state: &AppState,
    steward: &Steward,
    id: DbId,
) -> Result<Report, AppError> {
    let report = ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "report",
            id,
        })?;

    let is_assignee = report.assigned_to == Some(steward.id);
    let is_creator = report.created_by == Some(steward.id);
    if !is_assignee && !is_creator {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only access reports assigned to you or created by you".into(),
        )));
    }
    Ok(report)
}
