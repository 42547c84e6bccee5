use api::{routes::routes, state::AppState};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use db::models::{assignment::Model as AssignmentModel, submission::Model as SubmissionModel};
use db::test_utils::setup_test_db;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use services::{AnalysisConfig, AnalysisService, FileTextExtractor, LogNotifier};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    app: Router,
    db: DatabaseConnection,
    storage: TempDir,
}

async fn make_test_app() -> TestApp {
    let db = setup_test_db().await;
    let storage = tempfile::tempdir().expect("Failed to create storage dir");

    let analysis = Arc::new(AnalysisService::new(
        Arc::new(FileTextExtractor::new(storage.path())),
        Arc::new(LogNotifier),
        AnalysisConfig::default(),
    ));
    let app = Router::new().nest("/api", routes(AppState::new(db.clone(), analysis)));

    TestApp { app, db, storage }
}

impl TestApp {
    async fn seed_assignment(&self) -> i64 {
        AssignmentModel::create(&self.db, "Final Essay", Some("fixture"), 1)
            .await
            .expect("Failed to create assignment")
            .id
    }

    async fn seed_submission(&self, assignment_id: i64, student_id: i64, content: &str) -> i64 {
        let file_name = format!("assignment_{assignment_id}_student_{student_id}.txt");
        std::fs::write(self.storage.path().join(&file_name), content)
            .expect("Failed to write submission file");

        SubmissionModel::create(&self.db, assignment_id, student_id, &file_name)
            .await
            .expect("Failed to create submission")
            .id
    }

    async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(json_body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json_body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}

const ESSAY: &str = "The industrial revolution transformed European society. \
    Steam power replaced manual labour in factories across the continent. \
    Cities grew rapidly as workers migrated from the countryside.";

const OTHER_ESSAY: &str = "Photosynthesis converts sunlight into chemical energy. \
    Chlorophyll inside the leaf absorbs specific wavelengths of light. \
    Plants release oxygen as a by-product of this process.";

#[tokio::test]
async fn health_endpoint_is_public() {
    let t = make_test_app().await;
    let (status, body) = t.request("GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn analyze_creates_reports_and_second_run_is_idempotent() {
    let t = make_test_app().await;
    let assignment_id = t.seed_assignment().await;
    t.seed_submission(assignment_id, 1, ESSAY).await;
    t.seed_submission(assignment_id, 2, ESSAY).await;
    t.seed_submission(assignment_id, 3, OTHER_ESSAY).await;

    let uri = format!("/api/assignments/{assignment_id}/plagiarism/analyze");
    let (status, body) = t.request("POST", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["reports_created"], 3);
    assert_eq!(body["data"]["high_similarity_count"], 1);

    // Unchanged submission set: nothing new to compare.
    let (status, body) = t.request("POST", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["reports_created"], 0);

    let (status, body) = t
        .request(
            "GET",
            &format!("/api/assignments/{assignment_id}/plagiarism"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let reports = body["data"].as_array().unwrap();
    assert_eq!(reports.len(), 3);

    // Highest similarity first: the identical pair.
    assert_eq!(reports[0]["similarity_score"], 100.0);
    assert_eq!(reports[0]["status"], "pending");
    assert_eq!(reports[0]["is_notified"], true);
    assert_eq!(reports[1]["is_notified"], false);
}

#[tokio::test]
async fn analyze_unknown_assignment_is_not_found() {
    let t = make_test_app().await;
    let (status, body) = t
        .request("POST", "/api/assignments/9999/plagiarism/analyze", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn list_unknown_assignment_is_not_found() {
    let t = make_test_app().await;
    let (status, _) = t
        .request("GET", "/api/assignments/9999/plagiarism", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_an_analyzed_assignment_without_matches_is_empty_ok() {
    let t = make_test_app().await;
    let assignment_id = t.seed_assignment().await;

    let (status, body) = t
        .request(
            "GET",
            &format!("/api/assignments/{assignment_id}/plagiarism"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn report_detail_resolves_submission_metadata() {
    let t = make_test_app().await;
    let assignment_id = t.seed_assignment().await;
    t.seed_submission(assignment_id, 11, ESSAY).await;
    t.seed_submission(assignment_id, 22, ESSAY).await;

    t.request(
        "POST",
        &format!("/api/assignments/{assignment_id}/plagiarism/analyze"),
        None,
    )
    .await;

    let (_, listing) = t
        .request(
            "GET",
            &format!("/api/assignments/{assignment_id}/plagiarism"),
            None,
        )
        .await;
    let report_id = listing["data"][0]["id"].as_i64().unwrap();

    let (status, body) = t
        .request("GET", &format!("/api/plagiarism/reports/{report_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["submission_1"]["student_id"], 11);
    assert_eq!(body["data"]["submission_2"]["student_id"], 22);
    assert_eq!(body["data"]["similarity_score"], 100.0);

    // Identical sentence-delimited essays produce sentence evidence.
    assert!(!body["data"]["details"]["segments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn report_detail_unknown_id_is_not_found() {
    let t = make_test_app().await;
    let (status, _) = t.request("GET", "/api/plagiarism/reports/4242", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_update_round_trip() {
    let t = make_test_app().await;
    let assignment_id = t.seed_assignment().await;
    t.seed_submission(assignment_id, 1, ESSAY).await;
    t.seed_submission(assignment_id, 2, OTHER_ESSAY).await;

    t.request(
        "POST",
        &format!("/api/assignments/{assignment_id}/plagiarism/analyze"),
        None,
    )
    .await;
    let (_, listing) = t
        .request(
            "GET",
            &format!("/api/assignments/{assignment_id}/plagiarism"),
            None,
        )
        .await;
    let report_id = listing["data"][0]["id"].as_i64().unwrap();
    let uri = format!("/api/plagiarism/reports/{report_id}/status");

    let (status, body) = t
        .request(
            "PATCH",
            &uri,
            Some(json!({
                "status": "confirmed",
                "reviewer_id": 5,
                "notes": "Verbatim overlap in all sections"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "confirmed");
    assert_eq!(body["data"]["reviewed_by"], 5);

    // Re-opening a decided case is allowed.
    let (status, body) = t
        .request(
            "PATCH",
            &uri,
            Some(json!({ "status": "reviewing", "reviewer_id": 6 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "reviewing");

    let (_, detail) = t
        .request("GET", &format!("/api/plagiarism/reports/{report_id}"), None)
        .await;
    assert_eq!(detail["data"]["status"], "reviewing");
    assert_eq!(detail["data"]["reviewed_by"], 6);
}

#[tokio::test]
async fn status_update_rejects_unknown_status() {
    let t = make_test_app().await;
    let assignment_id = t.seed_assignment().await;
    t.seed_submission(assignment_id, 1, ESSAY).await;
    t.seed_submission(assignment_id, 2, OTHER_ESSAY).await;
    t.request(
        "POST",
        &format!("/api/assignments/{assignment_id}/plagiarism/analyze"),
        None,
    )
    .await;
    let (_, listing) = t
        .request(
            "GET",
            &format!("/api/assignments/{assignment_id}/plagiarism"),
            None,
        )
        .await;
    let report_id = listing["data"][0]["id"].as_i64().unwrap();

    let (status, body) = t
        .request(
            "PATCH",
            &format!("/api/plagiarism/reports/{report_id}/status"),
            Some(json!({ "status": "escalated", "reviewer_id": 5 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn status_update_unknown_report_is_not_found() {
    let t = make_test_app().await;
    let (status, _) = t
        .request(
            "PATCH",
            "/api/plagiarism/reports/4242/status",
            Some(json!({ "status": "reviewing", "reviewer_id": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn clearing_reports_enables_reanalysis() {
    let t = make_test_app().await;
    let assignment_id = t.seed_assignment().await;
    t.seed_submission(assignment_id, 1, ESSAY).await;
    t.seed_submission(assignment_id, 2, ESSAY).await;

    let analyze_uri = format!("/api/assignments/{assignment_id}/plagiarism/analyze");
    let clear_uri = format!("/api/assignments/{assignment_id}/plagiarism");

    t.request("POST", &analyze_uri, None).await;

    let (status, body) = t.request("DELETE", &clear_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"], 1);

    // Nothing left to delete.
    let (status, _) = t.request("DELETE", &clear_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Re-analysis starts from scratch.
    let (_, body) = t.request("POST", &analyze_uri, None).await;
    assert_eq!(body["data"]["reports_created"], 1);
}
