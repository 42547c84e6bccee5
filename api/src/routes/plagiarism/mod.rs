//! Plagiarism analysis and report review endpoints.

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

pub mod delete_reports;
pub mod get;
pub mod patch;
pub mod post;

/// Routes nested under `/assignments/{assignment_id}/plagiarism`.
pub fn assignment_plagiarism_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get::list_reports).delete(delete_reports::clear_reports),
        )
        .route("/analyze", post(post::analyze_assignment))
}

/// Routes nested under `/plagiarism`.
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports/{report_id}", get(get::get_report_detail))
        .route("/reports/{report_id}/status", patch(patch::set_report_status))
}
