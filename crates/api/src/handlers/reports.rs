//! Public (unauthenticated) report endpoints: citizen submission and
//! tracking-number lookup.

use aquareport_core::report::{self, CATEGORY_WATER};
use aquareport_db::models::report::{CreateReport, ReportWithNotes};
use aquareport_db::repositories::ReportRepo;
use aquareport_notify::templates;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Insert attempts before giving up on tracking-number generation. The
/// random suffix makes even one collision unlikely.
const TRACKING_MAX_ATTEMPTS: u32 = 3;

/// Multipart fields collected from a citizen submission form.
#[derive(Debug, Default)]
struct SubmissionForm {
    category: Option<String>,
    issue_type: String,
    location: String,
    description: String,
    severity: String,
    ward: String,
    landmark: String,
    reporter_name: String,
    reporter_phone: String,
    reporter_email: String,
    image: Option<(String, Vec<u8>)>,
}

impl SubmissionForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = SubmissionForm::default();
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
                _ => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Invalid field {name}: {e}")))?;
                    match name.as_str() {
                        "category" => form.category = Some(value),
                        "issueType" => form.issue_type = value,
                        "location" => form.location = value,
                        "description" => form.description = value,
                        "severity" => form.severity = value,
                        "ward" => form.ward = value,
                        "landmark" => form.landmark = value,
                        "reporterName" => form.reporter_name = value,
                        "phoneNumber" => form.reporter_phone = value,
                        "email" => form.reporter_email = value,
                        _ => {} // unknown fields are ignored
                    }
                }
            }
        }
        Ok(form)
    }
}

/// `POST /reports` -- citizen submission.
///
/// A failed image upload aborts the submission: citizens have no way to
/// re-attach the photo afterwards, so a silent drop would lose evidence.
pub async fn submit_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<serde_json::Value>>)> {
    let form = SubmissionForm::from_multipart(multipart).await?;

    report::validate_citizen_draft(
        &form.issue_type,
        &form.location,
        &form.description,
        &form.severity,
        &form.reporter_name,
        &form.reporter_phone,
        &form.reporter_email,
    )?;

    let category = form
        .category
        .clone()
        .unwrap_or_else(|| CATEGORY_WATER.to_string());
    report::validate_category(&category)?;

    let image_url = match &form.image {
        Some((file_name, bytes)) => Some(
            state
                .blob_store
                .store(bytes.clone(), file_name)
                .await
                .map_err(|e| AppError::Upload(format!("Failed to store image: {e}")))?,
        ),
        None => None,
    };

    let created = insert_with_fresh_tracking(&state, &form, &category, image_url).await?;

    let (subject, body) =
        templates::submission_confirmation(&created.reporter_name, &created.tracking_number);
    state
        .notifier
        .send_best_effort(created.reporter_email.clone(), subject, body);

    tracing::info!(
        report_id = created.id,
        tracking_number = %created.tracking_number,
        "citizen report submitted"
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
    form: &SubmissionForm,
    category: &str,
    image_url: Option<String>,
) -> Result<aquareport_db::models::report::Report, AppError> {
    let mut attempt = 0;
    loop {
        let input = CreateReport {
            tracking_number: report::generate_tracking_number(),
            category: category.to_string(),
            issue_type: form.issue_type.clone(),
            location: form.location.clone(),
            description: form.description.clone(),
            severity: form.severity.clone(),
            ward: form.ward.clone(),
            landmark: form.landmark.clone(),
            reporter_name: form.reporter_name.clone(),
            reporter_phone: form.reporter_phone.clone(),
            reporter_email: form.reporter_email.clone(),
            image_url: image_url.clone(),
            created_by: None,
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

#[derive(Debug, Deserialize)]
pub struct TrackingQuery {
    pub tracking: Option<String>,
}

/// `GET /reports?tracking=WL...` -- public status lookup.
pub async fn lookup_report(
    State(state): State<AppState>,
    Query(params): Query<TrackingQuery>,
) -> AppResult<Json<DataResponse<ReportWithNotes>>> {
    let tracking = params
        .tracking
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("tracking query parameter is required".into()))?;

    let report = ReportRepo::find_by_tracking(&state.pool, tracking)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No report found for {tracking}")))?;

    let notes = ReportRepo::notes_for(&state.pool, report.id).await?;
    Ok(Json(DataResponse::new(ReportWithNotes { report, notes })))
}
