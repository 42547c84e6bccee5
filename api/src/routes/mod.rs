//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → health check endpoint (public)
//! - `/assignments/{assignment_id}/plagiarism` → run, list and clear
//!   plagiarism analysis for one assignment
//! - `/plagiarism/reports/{report_id}` → single-report detail and review
//!
//! Authorization is the hosting system's concern; these routes assume the
//! caller may access the assignment they name.

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod plagiarism;

/// Builds the complete application router for all HTTP endpoints.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health::health_routes())
        .nest(
            "/assignments/{assignment_id}/plagiarism",
            plagiarism::assignment_plagiarism_routes(),
        )
        .nest("/plagiarism", plagiarism::report_routes())
        .with_state(app_state)
}
