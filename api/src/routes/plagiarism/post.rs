use axum::{Json, extract::Path, extract::State, http::StatusCode, response::IntoResponse};

use crate::{response::ApiResponse, state::AppState};
use services::{AnalysisError, AnalysisSummary};

/// POST /api/assignments/{assignment_id}/plagiarism/analyze
///
/// Runs the full plagiarism pipeline over the assignment's submissions:
/// extract each document's text, compare every previously-unseen submission
/// pair, persist one report per pair, and notify the assignment's lecturer
/// about reports at or above the configured threshold.
///
/// Re-running is safe: pairs that already have a report are skipped, so a
/// second run over an unchanged submission set reports `reports_created: 0`.
/// To force a re-score, clear the assignment's reports first.
///
/// # Returns
/// - `200 OK` with the run summary
/// - `404 NOT FOUND` if the assignment does not exist
/// - `500 INTERNAL SERVER ERROR` for database errors
///
/// # Example Response (200 OK)
///
/// ```json
/// {
///   "success": true,
///   "message": "Plagiarism analysis completed successfully",
///   "data": {
///     "reports_created": 3,
///     "high_similarity_count": 1
///   }
/// }
/// ```
pub async fn analyze_assignment(
    State(app_state): State<AppState>,
    Path(assignment_id): Path<i64>,
) -> impl IntoResponse {
    match app_state
        .analysis()
        .analyze_assignment(app_state.db(), assignment_id)
        .await
    {
        Ok(summary) => (
            StatusCode::OK,
            Json(ApiResponse::<AnalysisSummary>::success(
                summary,
                "Plagiarism analysis completed successfully",
            )),
        )
            .into_response(),
        Err(AnalysisError::AssignmentNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Assignment not found")),
        )
            .into_response(),
        Err(AnalysisError::Db(e)) => {
            log::error!("plagiarism analysis failed for assignment {assignment_id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to analyze assignment")),
            )
                .into_response()
        }
    }
}
