//! Admin-side steward provisioning and management.

use aquareport_core::credentials::generate_temp_password;
use aquareport_core::error::CoreError;
use aquareport_core::steward::{
    self, DEFAULT_DEPARTMENT, EMPLOYEE_ID_MAX_ATTEMPTS,
};
use aquareport_core::types::{DbId, Timestamp};
use aquareport_db::models::steward::{
    CreateSteward, StewardFilters, StewardResponse, UpdateSteward,
};
use aquareport_db::repositories::StewardRepo;
use aquareport_db::{clamp_limit, page_offset};
use aquareport_notify::templates;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth::password::hash_password;
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct CreateStewardRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub department: Option<String>,
    pub position: String,
    pub employee_id: Option<String>,
    pub date_hired: Option<Timestamp>,
}

/// Normalize a caller-supplied employee ID: trimmed and uppercased, so
/// `stw0007` and `STW0007` name the same account.
fn normalized_employee_id(raw: &str) -> Result<String, CoreError> {
    let id = raw.trim().to_uppercase();
    steward::validate_text_field("employeeId", &id, steward::MAX_EMPLOYEE_ID_LEN)?;
    Ok(id)
}

/// `POST /admin/stewards` -- provision a steward account.
///
/// A caller-supplied employee ID is used verbatim; a duplicate is a
/// conflict naming the field. When the ID is omitted it is derived from
/// the current steward count, and since concurrent provisioning can make
/// two requests derive the same candidate, the insert retries with offset
/// candidates on a unique-constraint conflict and finally falls back to a
/// timestamp-derived ID.
pub async fn create_steward(
    State(state): State<AppState>,
    admin: AdminAuth,
    Json(body): Json<CreateStewardRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<serde_json::Value>>)> {
    let department = body
        .department
        .clone()
        .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string());
    steward::validate_profile(
        &body.name,
        &body.email,
        &body.phone,
        &body.address,
        &department,
        &body.position,
    )?;

    let supplied_id = body
        .employee_id
        .as_deref()
        .map(normalized_employee_id)
        .transpose()?;

    let temp_password = generate_temp_password();
    let password_hash = hash_password(&temp_password)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {e}")))?;

    let current_count = StewardRepo::count(&state.pool).await?;

    let mut attempt = 0;
    let created = loop {
        let employee_id = match &supplied_id {
            Some(id) => id.clone(),
            None if attempt < EMPLOYEE_ID_MAX_ATTEMPTS => {
                steward::employee_id_candidate(current_count, attempt)
            }
            None => steward::employee_id_fallback(),
        };
        let input = CreateSteward {
            employee_id,
            name: body.name.trim().to_string(),
            email: body.email.trim().to_lowercase(),
            phone: body.phone.trim().to_string(),
            address: body.address.trim().to_string(),
            department: department.clone(),
            position: body.position.trim().to_string(),
            date_hired: body.date_hired,
            password_hash: password_hash.clone(),
            created_by: admin.admin_id,
        };
        match StewardRepo::create(&state.pool, &input).await {
            Ok(steward) => break steward,
            Err(err) if is_unique_violation(&err, "uq_stewards_employee_id") => {
                // A caller-picked ID is not ours to regenerate.
                if supplied_id.is_some() {
                    return Err(AppError::Core(CoreError::Conflict(
                        "A steward with this employeeId already exists".into(),
                    )));
                }
                if attempt > EMPLOYEE_ID_MAX_ATTEMPTS {
                    return Err(err.into());
                }
                attempt += 1;
                tracing::warn!(attempt, "employee id collision, retrying with next candidate");
            }
            Err(err) if is_unique_violation(&err, "uq_stewards_email") => {
                return Err(AppError::Core(CoreError::Conflict(
                    "A steward with this email already exists".into(),
                )));
            }
            Err(err) => return Err(err.into()),
        }
    };

    // The credentials email is the only copy of the temporary password, so
    // the response reports whether delivery succeeded.
    let (subject, html) =
        templates::steward_credentials(&created.name, &created.employee_id, &temp_password);
    let email_sent = state
        .notifier
        .send_and_report(&created.email, &subject, &html)
        .await;

    tracing::info!(
        steward_id = created.id,
        employee_id = %created.employee_id,
        email_sent,
        "steward provisioned"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(json!({
            "steward": StewardResponse::from(created),
            "email_sent": email_sent,
        }))),
    ))
}

#[derive(Debug, Deserialize)]
pub struct StewardListParams {
    pub department: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// `GET /admin/stewards` -- filtered steward roster.
pub async fn list_stewards(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Query(params): Query<StewardListParams>,
) -> AppResult<Json<PageResponse<StewardResponse>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT);
    let page = params.page.unwrap_or(1).max(1);
    let offset = page_offset(Some(page), limit);

    let filters = StewardFilters {
        department: params.department,
        status: params.status,
    };
    let stewards = StewardRepo::list_filtered(&state.pool, &filters, limit, offset).await?;
    let total = StewardRepo::count_filtered(&state.pool, &filters).await?;

    Ok(Json(PageResponse {
        data: stewards.into_iter().map(StewardResponse::from).collect(),
        total,
        page,
        limit,
    }))
}

/// `GET /admin/stewards/{id}`.
pub async fn get_steward(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<StewardResponse>>> {
    let steward = StewardRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "steward",
            id,
        })?;
    Ok(Json(DataResponse::new(StewardResponse::from(steward))))
}

/// `PATCH /admin/stewards/{id}` -- partial profile update.
pub async fn update_steward(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateSteward>,
) -> AppResult<Json<DataResponse<StewardResponse>>> {
    if let Some(name) = &body.name {
        steward::validate_text_field("name", name, steward::MAX_NAME_LEN)?;
    }
    if let Some(email) = &body.email {
        steward::validate_email(email)?;
    }
    if let Some(phone) = &body.phone {
        steward::validate_phone(phone)?;
    }
    if let Some(address) = &body.address {
        steward::validate_text_field("address", address, steward::MAX_ADDRESS_LEN)?;
    }
    if let Some(department) = &body.department {
        steward::validate_department(department)?;
    }
    if let Some(position) = &body.position {
        steward::validate_text_field("position", position, steward::MAX_POSITION_LEN)?;
    }
    if let Some(status) = &body.status {
        steward::validate_status(status)?;
    }

    let updated = StewardRepo::update(&state.pool, id, &body)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "steward",
            id,
        })?;
    Ok(Json(DataResponse::new(StewardResponse::from(updated))))
}

/// `DELETE /admin/stewards/{id}`.
pub async fn delete_steward(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let removed = StewardRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "steward",
            id,
        }));
    }
    tracing::info!(steward_id = id, "steward deleted");
    Ok(Json(DataResponse::new(json!({ "deleted": true }))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplied_employee_id_is_trimmed_and_uppercased() {
        assert_eq!(normalized_employee_id("  stw0007 ").unwrap(), "STW0007");
        assert_eq!(normalized_employee_id("FLD-12").unwrap(), "FLD-12");
    }

    #[test]
    fn blank_or_oversized_employee_id_is_rejected() {
        let err = normalized_employee_id("   ").unwrap_err();
        assert!(err.to_string().contains("employeeId is required"));

        let long = "X".repeat(steward::MAX_EMPLOYEE_ID_LEN + 1);
        let err = normalized_employee_id(&long).unwrap_err();
        assert!(err.to_string().contains("employeeId cannot exceed"));
    }
}
