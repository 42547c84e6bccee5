use axum::{Json, extract::Path, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use sea_orm::EntityTrait;
use serde::Serialize;

use db::models::{
    assignment::Model as AssignmentModel,
    plagiarism_report::{Entity as ReportEntity, Model as ReportModel, ReportDetails},
    submission::Model as SubmissionModel,
};

use crate::{response::ApiResponse, state::AppState};

#[derive(Serialize)]
pub struct ReportResponse {
    pub id: i64,
    pub assignment_id: i64,
    pub submission_id_1: i64,
    pub submission_id_2: i64,
    pub similarity_score: f64,
    pub status: String,
    pub reviewed_by: Option<i64>,
    pub review_notes: Option<String>,
    pub is_notified: bool,
    pub details: ReportDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReportModel> for ReportResponse {
    fn from(report: ReportModel) -> Self {
        Self {
            id: report.id,
            assignment_id: report.assignment_id,
            submission_id_1: report.submission_id_1,
            submission_id_2: report.submission_id_2,
            similarity_score: report.similarity_score,
            status: report.status.to_string(),
            reviewed_by: report.reviewed_by,
            review_notes: report.review_notes,
            is_notified: report.is_notified,
            details: report.details,
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct SubmissionInfo {
    pub id: i64,
    pub student_id: i64,
    pub file_path: String,
}

#[derive(Serialize)]
pub struct ReportDetailResponse {
    #[serde(flatten)]
    pub report: ReportResponse,
    pub submission_1: SubmissionInfo,
    pub submission_2: SubmissionInfo,
}

/// GET /api/assignments/{assignment_id}/plagiarism
///
/// Lists every plagiarism report for the assignment, highest similarity
/// first (ties broken by recency).
///
/// # Returns
/// - `200 OK` with the report list (possibly empty)
/// - `404 NOT FOUND` if the assignment does not exist
/// - `500 INTERNAL SERVER ERROR` for database errors
pub async fn list_reports(
    State(app_state): State<AppState>,
    Path(assignment_id): Path<i64>,
) -> impl IntoResponse {
    match AssignmentModel::find_by_id(app_state.db(), assignment_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Assignment not found")),
            )
                .into_response();
        }
        Err(e) => {
            log::error!("failed to look up assignment {assignment_id}: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to retrieve reports")),
            )
                .into_response();
        }
    }

    match ReportEntity::list_by_assignment(app_state.db(), assignment_id).await {
        Ok(reports) => {
            let payload: Vec<ReportResponse> =
                reports.into_iter().map(ReportResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    payload,
                    "Plagiarism reports retrieved successfully",
                )),
            )
                .into_response()
        }
        Err(e) => {
            log::error!("failed to list reports for assignment {assignment_id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to retrieve reports")),
            )
                .into_response()
        }
    }
}

/// GET /api/plagiarism/reports/{report_id}
///
/// Fetches one report together with the metadata of both submissions
/// involved, for rendering the reviewer's side-by-side view.
///
/// # Returns
/// - `200 OK` with the report and resolved submission metadata
/// - `404 NOT FOUND` if the report (or either submission) does not exist
/// - `500 INTERNAL SERVER ERROR` for database errors
pub async fn get_report_detail(
    State(app_state): State<AppState>,
    Path(report_id): Path<i64>,
) -> impl IntoResponse {
    let report = match ReportEntity::find_by_id(report_id).one(app_state.db()).await {
        Ok(Some(report)) => report,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Plagiarism report not found")),
            )
                .into_response();
        }
        Err(e) => {
            log::error!("failed to fetch report {report_id}: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to retrieve report")),
            )
                .into_response();
        }
    };

    let submission_1 =
        SubmissionModel::find_by_id(app_state.db(), report.submission_id_1).await;
    let submission_2 =
        SubmissionModel::find_by_id(app_state.db(), report.submission_id_2).await;

    match (submission_1, submission_2) {
        (Ok(Some(sub_1)), Ok(Some(sub_2))) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ReportDetailResponse {
                    report: ReportResponse::from(report),
                    submission_1: SubmissionInfo {
                        id: sub_1.id,
                        student_id: sub_1.student_id,
                        file_path: sub_1.file_path,
                    },
                    submission_2: SubmissionInfo {
                        id: sub_2.id,
                        student_id: sub_2.student_id,
                        file_path: sub_2.file_path,
                    },
                },
                "Plagiarism report retrieved successfully",
            )),
        )
            .into_response(),
        (Ok(None), _) | (_, Ok(None)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(
                "Submission referenced by report not found",
            )),
        )
            .into_response(),
        (Err(e), _) | (_, Err(e)) => {
            log::error!("failed to resolve submissions for report {report_id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to retrieve report")),
            )
                .into_response()
        }
    }
}
