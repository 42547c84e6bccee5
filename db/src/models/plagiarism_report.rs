//! Plagiarism report entity and store operations.
//!
//! One report exists per unordered submission pair per assignment. The pair is
//! stored normalized (lower submission id first) and guarded by a unique index,
//! so concurrent analysis runs racing on the same pair resolve to a single row.
//! Score and details are written once at creation and never mutated; only the
//! review fields and the notified flag change afterwards.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, DatabaseConnection, FromJsonQueryResult, IntoActiveModel, QueryOrder};
use serde::{Deserialize, Serialize};

use similarity::MatchedSegment;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "plagiarism_reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Assignment both submissions belong to.
    pub assignment_id: i64,

    /// Lower submission id of the pair.
    pub submission_id_1: i64,

    /// Higher submission id of the pair.
    pub submission_id_2: i64,

    /// Similarity percentage in [0, 100], two-decimal precision.
    pub similarity_score: f64,

    /// Matched-segment evidence plus aggregate counters.
    #[sea_orm(column_type = "JsonBinary")]
    pub details: ReportDetails,

    /// Review status of the report.
    pub status: Status,

    /// Reviewer who last changed the status.
    pub reviewed_by: Option<i64>,

    /// Free-text reviewer notes.
    pub review_notes: Option<String>,

    /// Whether a high-similarity notification was already dispatched.
    pub is_notified: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Structured evidence attached to a report at creation time.
///
/// For the token-diff strategy the counters are character counts; for the
/// shingle strategy they are shingle-set sizes (union and intersection). In
/// both cases `matched / total * 100` reproduces the stored score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ReportDetails {
    pub segments: Vec<MatchedSegment>,
    pub total_characters: usize,
    pub matched_characters: usize,
}

/// Review lifecycle of a report. Creation always starts at `pending`;
/// transitions are reviewer-driven and any status may move to any other
/// (re-opening a confirmed or dismissed case is legitimate).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    sea_orm::strum::Display,
    sea_orm::strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Status {
    /// Freshly created, not yet looked at.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// A reviewer has picked the report up.
    #[sea_orm(string_value = "reviewing")]
    Reviewing,
    /// Reviewed and upheld as plagiarism.
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Reviewed and cleared.
    #[sea_orm(string_value = "dismissed")]
    Dismissed,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignment::Entity",
        from = "Column::AssignmentId",
        to = "super::assignment::Column::Id",
        on_delete = "Cascade"
    )]
    Assignment,

    #[sea_orm(
        belongs_to = "super::submission::Entity",
        from = "Column::SubmissionId1",
        to = "super::submission::Column::Id"
    )]
    Submission1,

    #[sea_orm(
        belongs_to = "super::submission::Entity",
        from = "Column::SubmissionId2",
        to = "super::submission::Column::Id"
    )]
    Submission2,
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Orders a submission pair canonically (lower id first). `(A, B)` and
/// `(B, A)` therefore always address the same row.
pub fn pair_key(submission_a: i64, submission_b: i64) -> (i64, i64) {
    if submission_a <= submission_b {
        (submission_a, submission_b)
    } else {
        (submission_b, submission_a)
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err, DbErr::Exec(_) | DbErr::Query(_))
        && err.to_string().to_lowercase().contains("unique")
}

impl Entity {
    /// Inserts a new report for the pair with status `pending` and
    /// `is_notified = false`.
    ///
    /// Caller contract: both submissions must belong to `assignment_id`. The
    /// comparator only pairs submissions fetched from a single assignment,
    /// and submission ids are globally unique, so a pair can never span two
    /// assignments.
    ///
    /// Returns `Ok(None)` when a report for the pair already exists: either
    /// the unique pair index rejected the insert (a concurrent run got there
    /// first) or an earlier run created it. Callers treat that as a skip.
    pub async fn create_report(
        db: &DatabaseConnection,
        assignment_id: i64,
        submission_a: i64,
        submission_b: i64,
        similarity_score: f64,
        details: ReportDetails,
    ) -> Result<Option<Model>, DbErr> {
        if submission_a == submission_b {
            return Err(DbErr::Custom(
                "cannot compare a submission against itself".into(),
            ));
        }

        let (low, high) = pair_key(submission_a, submission_b);
        let now = Utc::now();
        let active = ActiveModel {
            assignment_id: Set(assignment_id),
            submission_id_1: Set(low),
            submission_id_2: Set(high),
            similarity_score: Set(similarity_score),
            details: Set(details),
            status: Set(Status::Pending),
            reviewed_by: Set(None),
            review_notes: Set(None),
            is_notified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match active.insert(db).await {
            Ok(model) => Ok(Some(model)),
            Err(err) if is_unique_violation(&err) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Symmetric existence check for the unordered pair.
    pub async fn exists_for_pair(
        db: &DatabaseConnection,
        submission_a: i64,
        submission_b: i64,
    ) -> Result<bool, DbErr> {
        Ok(Self::find_by_pair(db, submission_a, submission_b)
            .await?
            .is_some())
    }

    /// Symmetric fetch for the unordered pair.
    pub async fn find_by_pair(
        db: &DatabaseConnection,
        submission_a: i64,
        submission_b: i64,
    ) -> Result<Option<Model>, DbErr> {
        let (low, high) = pair_key(submission_a, submission_b);
        Entity::find()
            .filter(Column::SubmissionId1.eq(low))
            .filter(Column::SubmissionId2.eq(high))
            .one(db)
            .await
    }

    /// All reports for an assignment, highest score first, ties broken by
    /// recency.
    pub async fn list_by_assignment(
        db: &DatabaseConnection,
        assignment_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_desc(Column::SimilarityScore)
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }

    /// Reports at or above the given score, highest first.
    pub async fn list_high_similarity(
        db: &DatabaseConnection,
        threshold: f64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::SimilarityScore.gte(threshold))
            .order_by_desc(Column::SimilarityScore)
            .all(db)
            .await
    }

    /// Applies a reviewer decision. All transitions are permitted, including
    /// re-opening a confirmed or dismissed report.
    pub async fn update_status(
        db: &DatabaseConnection,
        report_id: i64,
        status: Status,
        reviewed_by: i64,
        review_notes: Option<String>,
    ) -> Result<Model, DbErr> {
        let Some(report) = Entity::find_by_id(report_id).one(db).await? else {
            return Err(DbErr::RecordNotFound(format!(
                "plagiarism report {report_id} not found"
            )));
        };

        let mut active = report.into_active_model();
        active.status = Set(status);
        active.reviewed_by = Set(Some(reviewed_by));
        active.review_notes = Set(review_notes);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    /// Records that the high-similarity notification went out. Idempotent.
    pub async fn mark_notified(db: &DatabaseConnection, report_id: i64) -> Result<(), DbErr> {
        let Some(report) = Entity::find_by_id(report_id).one(db).await? else {
            return Err(DbErr::RecordNotFound(format!(
                "plagiarism report {report_id} not found"
            )));
        };
        if report.is_notified {
            return Ok(());
        }

        let mut active = report.into_active_model();
        active.is_notified = Set(true);
        active.updated_at = Set(Utc::now());
        active.update(db).await.map(|_| ())
    }

    /// Removes every report for the assignment so it can be re-analyzed from
    /// scratch. Returns the number of rows deleted.
    pub async fn delete_by_assignment(
        db: &DatabaseConnection,
        assignment_id: i64,
    ) -> Result<u64, DbErr> {
        let result = Entity::delete_many()
            .filter(Column::AssignmentId.eq(assignment_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
