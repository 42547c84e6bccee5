use crate::models::{
    assignment::Model as AssignmentModel,
    plagiarism_report::{Entity as ReportEntity, ReportDetails, Status, pair_key},
    submission::Model as SubmissionModel,
};
use crate::test_utils::setup_test_db;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

struct Fixture {
    assignment_id: i64,
    submissions: Vec<i64>,
}

async fn seed(db: &DatabaseConnection, submission_count: usize) -> Fixture {
    let assignment = AssignmentModel::create(db, "Essay 1", Some("Plagiarism fixture"), 1)
        .await
        .expect("Failed to create assignment");

    let mut submissions = Vec::new();
    for student in 0..submission_count {
        let submission = SubmissionModel::create(
            db,
            assignment.id,
            student as i64 + 1,
            &format!("assignment_{}/sub_{student}.txt", assignment.id),
        )
        .await
        .expect("Failed to create submission");
        submissions.push(submission.id);
    }

    Fixture {
        assignment_id: assignment.id,
        submissions,
    }
}

fn details(total: usize, matched: usize) -> ReportDetails {
    ReportDetails {
        segments: vec![],
        total_characters: total,
        matched_characters: matched,
    }
}

#[test]
fn pair_key_is_symmetric() {
    assert_eq!(pair_key(7, 3), (3, 7));
    assert_eq!(pair_key(3, 7), (3, 7));
}

#[tokio::test]
async fn create_starts_pending_and_unnotified() {
    let db = setup_test_db().await;
    let f = seed(&db, 2).await;

    let report = ReportEntity::create_report(
        &db,
        f.assignment_id,
        f.submissions[0],
        f.submissions[1],
        42.5,
        details(200, 85),
    )
    .await
    .unwrap()
    .expect("first create should insert");

    assert_eq!(report.status, Status::Pending);
    assert!(!report.is_notified);
    assert_eq!(report.similarity_score, 42.5);
    assert_eq!(report.reviewed_by, None);
    assert!(report.submission_id_1 < report.submission_id_2);
}

#[tokio::test]
async fn pair_lookup_is_symmetric_and_unique() {
    let db = setup_test_db().await;
    let f = seed(&db, 2).await;
    let (a, b) = (f.submissions[0], f.submissions[1]);

    ReportEntity::create_report(&db, f.assignment_id, a, b, 10.0, details(10, 1))
        .await
        .unwrap()
        .expect("insert");

    assert!(ReportEntity::exists_for_pair(&db, a, b).await.unwrap());
    assert!(ReportEntity::exists_for_pair(&db, b, a).await.unwrap());

    // Reversed order hits the unique index and resolves to a skip.
    let second = ReportEntity::create_report(&db, f.assignment_id, b, a, 99.0, details(10, 9))
        .await
        .unwrap();
    assert!(second.is_none());

    // The original row is untouched.
    let stored = ReportEntity::find_by_pair(&db, b, a).await.unwrap().unwrap();
    assert_eq!(stored.similarity_score, 10.0);

    let all = ReportEntity::list_by_assignment(&db, f.assignment_id)
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn self_pair_is_rejected() {
    let db = setup_test_db().await;
    let f = seed(&db, 1).await;

    let result = ReportEntity::create_report(
        &db,
        f.assignment_id,
        f.submissions[0],
        f.submissions[0],
        0.0,
        details(0, 0),
    )
    .await;
    assert!(matches!(result, Err(DbErr::Custom(_))));
}

#[tokio::test]
async fn listing_orders_by_score_descending() {
    let db = setup_test_db().await;
    let f = seed(&db, 4).await;
    let s = &f.submissions;

    for (pair, score) in [((0, 1), 40.0), ((0, 2), 90.0), ((1, 2), 65.5)] {
        ReportEntity::create_report(&db, f.assignment_id, s[pair.0], s[pair.1], score, details(100, score as usize))
            .await
            .unwrap()
            .expect("insert");
    }

    let reports = ReportEntity::list_by_assignment(&db, f.assignment_id)
        .await
        .unwrap();
    let scores: Vec<f64> = reports.iter().map(|r| r.similarity_score).collect();
    assert_eq!(scores, vec![90.0, 65.5, 40.0]);
}

#[tokio::test]
async fn high_similarity_listing_is_inclusive() {
    let db = setup_test_db().await;
    let f = seed(&db, 3).await;
    let s = &f.submissions;

    ReportEntity::create_report(&db, f.assignment_id, s[0], s[1], 70.0, details(100, 70))
        .await
        .unwrap()
        .unwrap();
    ReportEntity::create_report(&db, f.assignment_id, s[0], s[2], 69.99, details(100, 69))
        .await
        .unwrap()
        .unwrap();

    let high = ReportEntity::list_high_similarity(&db, 70.0).await.unwrap();
    assert_eq!(high.len(), 1);
    assert_eq!(high[0].similarity_score, 70.0);
}

#[tokio::test]
async fn status_round_trip_is_observable() {
    let db = setup_test_db().await;
    let f = seed(&db, 2).await;

    let report = ReportEntity::create_report(
        &db,
        f.assignment_id,
        f.submissions[0],
        f.submissions[1],
        80.0,
        details(100, 80),
    )
    .await
    .unwrap()
    .unwrap();

    for (status, notes) in [
        (Status::Confirmed, Some("clear copy".to_string())),
        (Status::Reviewing, None),
        (Status::Dismissed, Some("false positive".to_string())),
    ] {
        ReportEntity::update_status(&db, report.id, status, 99, notes.clone())
            .await
            .unwrap();

        let stored = ReportEntity::find_by_id(report.id).one(&db).await.unwrap().unwrap();
        assert_eq!(stored.status, status);
        assert_eq!(stored.reviewed_by, Some(99));
        assert_eq!(stored.review_notes, notes);
    }
}

#[tokio::test]
async fn update_status_on_missing_report_is_not_found() {
    let db = setup_test_db().await;
    seed(&db, 0).await;

    let result = ReportEntity::update_status(&db, 424242, Status::Reviewing, 1, None).await;
    assert!(matches!(result, Err(DbErr::RecordNotFound(_))));
}

#[tokio::test]
async fn mark_notified_is_idempotent() {
    let db = setup_test_db().await;
    let f = seed(&db, 2).await;

    let report = ReportEntity::create_report(
        &db,
        f.assignment_id,
        f.submissions[0],
        f.submissions[1],
        91.0,
        details(100, 91),
    )
    .await
    .unwrap()
    .unwrap();

    ReportEntity::mark_notified(&db, report.id).await.unwrap();
    ReportEntity::mark_notified(&db, report.id).await.unwrap();

    let stored = ReportEntity::find_by_id(report.id).one(&db).await.unwrap().unwrap();
    assert!(stored.is_notified);
}

#[tokio::test]
async fn delete_by_assignment_counts_and_scopes() {
    let db = setup_test_db().await;
    let f1 = seed(&db, 3).await;
    let f2 = seed(&db, 2).await;
    let s = &f1.submissions;

    for pair in [(0, 1), (0, 2), (1, 2)] {
        ReportEntity::create_report(&db, f1.assignment_id, s[pair.0], s[pair.1], 50.0, details(10, 5))
            .await
            .unwrap()
            .unwrap();
    }
    ReportEntity::create_report(
        &db,
        f2.assignment_id,
        f2.submissions[0],
        f2.submissions[1],
        33.0,
        details(10, 3),
    )
    .await
    .unwrap()
    .unwrap();

    let deleted = ReportEntity::delete_by_assignment(&db, f1.assignment_id)
        .await
        .unwrap();
    assert_eq!(deleted, 3);

    assert!(ReportEntity::list_by_assignment(&db, f1.assignment_id)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        ReportEntity::list_by_assignment(&db, f2.assignment_id)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn details_round_trip_through_json_column() {
    let db = setup_test_db().await;
    let f = seed(&db, 2).await;

    let evidence = ReportDetails {
        segments: vec![similarity::MatchedSegment {
            text: "the copied paragraph stays identical".into(),
            start_a: 0,
            end_a: 36,
            start_b: 12,
            end_b: 48,
            similarity: 100.0,
        }],
        total_characters: 120,
        matched_characters: 36,
    };

    let report = ReportEntity::create_report(
        &db,
        f.assignment_id,
        f.submissions[0],
        f.submissions[1],
        30.0,
        evidence.clone(),
    )
    .await
    .unwrap()
    .unwrap();

    let stored = ReportEntity::find_by_id(report.id).one(&db).await.unwrap().unwrap();
    assert_eq!(stored.details, evidence);
    assert_eq!(stored.details.segments[0].end_b, 48);
}
