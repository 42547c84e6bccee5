use axum::{Json, extract::Path, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use validator::Validate;

use db::models::plagiarism_report::{Entity as ReportEntity, Status};

use crate::{response::ApiResponse, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct SetStatusPayload {
    /// One of `pending`, `reviewing`, `confirmed`, `dismissed`.
    pub status: String,

    #[validate(range(min = 1, message = "reviewer_id must be a positive id"))]
    pub reviewer_id: i64,

    #[validate(length(max = 5000, message = "notes must be at most 5000 characters"))]
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub id: i64,
    pub status: String,
    pub reviewed_by: Option<i64>,
    pub review_notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// PATCH /api/plagiarism/reports/{report_id}/status
///
/// Applies a reviewer decision to a report. The workflow is reviewer-driven:
/// any status may move to any other, including re-opening a confirmed or
/// dismissed case back to `reviewing`.
///
/// # Request Body
///
/// ```json
/// {
///   "status": "confirmed",
///   "reviewer_id": 12,
///   "notes": "Sections 2 and 3 are verbatim."
/// }
/// ```
///
/// # Returns
/// - `200 OK` with the updated review fields
/// - `400 BAD REQUEST` for an unknown status value or invalid payload
/// - `404 NOT FOUND` if the report does not exist
/// - `500 INTERNAL SERVER ERROR` for database errors
pub async fn set_report_status(
    State(app_state): State<AppState>,
    Path(report_id): Path<i64>,
    Json(payload): Json<SetStatusPayload>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(common::format_validation_errors(
                &errors,
            ))),
        )
            .into_response();
    }

    let status: Status = match payload.status.parse() {
        Ok(status) => status,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(format!(
                    "Invalid status value: {}",
                    payload.status
                ))),
            )
                .into_response();
        }
    };

    match ReportEntity::update_status(
        app_state.db(),
        report_id,
        status,
        payload.reviewer_id,
        payload.notes,
    )
    .await
    {
        Ok(report) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StatusResponse {
                    id: report.id,
                    status: report.status.to_string(),
                    reviewed_by: report.reviewed_by,
                    review_notes: report.review_notes,
                    updated_at: report.updated_at,
                },
                "Report status updated successfully",
            )),
        )
            .into_response(),
        Err(DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Plagiarism report not found")),
        )
            .into_response(),
        Err(e) => {
            log::error!("failed to update status of report {report_id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to update report status")),
            )
                .into_response()
        }
    }
}
