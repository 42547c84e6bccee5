use axum::{Json, extract::Path, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use db::models::plagiarism_report::Entity as ReportEntity;

use crate::{response::ApiResponse, state::AppState};

#[derive(Serialize)]
pub struct ClearedResponse {
    pub deleted: u64,
}

/// DELETE /api/assignments/{assignment_id}/plagiarism
///
/// Removes every plagiarism report for the assignment so a later analysis
/// run starts from scratch. This is the only way reports are ever deleted.
///
/// # Returns
/// - `200 OK` with the number of reports removed
/// - `404 NOT FOUND` if the assignment had no reports
/// - `500 INTERNAL SERVER ERROR` for database errors
pub async fn clear_reports(
    State(app_state): State<AppState>,
    Path(assignment_id): Path<i64>,
) -> impl IntoResponse {
    match ReportEntity::delete_by_assignment(app_state.db(), assignment_id).await {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(
                "No plagiarism reports found for this assignment",
            )),
        )
            .into_response(),
        Ok(deleted) => {
            log::info!("cleared {deleted} plagiarism report(s) for assignment {assignment_id}");
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    ClearedResponse { deleted },
                    "Plagiarism reports deleted successfully",
                )),
            )
                .into_response()
        }
        Err(e) => {
            log::error!("failed to clear reports for assignment {assignment_id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to delete reports")),
            )
                .into_response()
        }
    }
}
