//! Analysis orchestrator: extraction, comparison, persistence, notification.

use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use db::models::{
    assignment::Model as AssignmentModel,
    plagiarism_report::{Entity as ReportEntity, ReportDetails},
    submission::Model as SubmissionModel,
};
use similarity::Strategy;

use crate::comparator::PairwiseComparator;
use crate::error::{AnalysisError, ExtractionError};
use crate::extraction::TextExtractor;
use crate::notification::NotificationSink;

/// Deployment-level knobs for an analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub strategy: Strategy,
    /// Reports scoring at or above this value (inclusive) are notified.
    pub notify_threshold: f64,
    /// Bound on a single submission's text extraction.
    pub extraction_timeout: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Shingle,
            notify_threshold: 70.0,
            extraction_timeout: Duration::from_secs(30),
        }
    }
}

/// Aggregate outcome of one `analyze_assignment` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    pub reports_created: usize,
    pub high_similarity_count: usize,
}

/// Runs the full pipeline for one assignment's submission set.
///
/// Idempotent at the pair level: a re-run only processes pairs without an
/// existing report. Re-scoring requires clearing the assignment's reports
/// first.
pub struct AnalysisService {
    extractor: Arc<dyn TextExtractor>,
    notifier: Arc<dyn NotificationSink>,
    config: AnalysisConfig,
}

impl AnalysisService {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        notifier: Arc<dyn NotificationSink>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            extractor,
            notifier,
            config,
        }
    }

    pub async fn analyze_assignment(
        &self,
        db: &DatabaseConnection,
        assignment_id: i64,
    ) -> Result<AnalysisSummary, AnalysisError> {
        let assignment = AssignmentModel::find_by_id(db, assignment_id)
            .await?
            .ok_or(AnalysisError::AssignmentNotFound(assignment_id))?;

        let submissions = SubmissionModel::list_by_assignment(db, assignment_id).await?;
        if submissions.len() < 2 {
            log::info!(
                "assignment {assignment_id} has {} submission(s), nothing to compare",
                submissions.len()
            );
            return Ok(AnalysisSummary::default());
        }

        log::info!(
            "analyzing assignment {assignment_id} with {} submissions",
            submissions.len()
        );

        // Extract every submission's text up front; a failed or timed-out
        // extraction drops that submission from all pairs without aborting
        // the run.
        let mut extracted = Vec::with_capacity(submissions.len());
        for submission in submissions {
            let extraction = tokio::time::timeout(
                self.config.extraction_timeout,
                self.extractor.extract_text(&submission),
            )
            .await
            .unwrap_or(Err(ExtractionError::Timeout(
                self.config.extraction_timeout,
            )));

            match extraction {
                Ok(text) => extracted.push((submission, text)),
                Err(err) => {
                    log::warn!(
                        "skipping submission {}: text extraction failed: {err}",
                        submission.id
                    );
                }
            }
        }

        let comparator = PairwiseComparator::new(self.config.strategy);
        let outcomes = comparator.compare_pairs(db, &extracted).await?;

        let mut summary = AnalysisSummary::default();
        for outcome in outcomes {
            let details = ReportDetails {
                total_characters: outcome.comparison.total_characters,
                matched_characters: outcome.comparison.matched_characters,
                segments: outcome.comparison.segments,
            };

            // A concurrent run may have inserted this pair since the
            // comparator's existence check; the store reports that as a skip.
            let Some(report) = ReportEntity::create_report(
                db,
                assignment_id,
                outcome.submission_id_a,
                outcome.submission_id_b,
                outcome.comparison.score,
                details,
            )
            .await?
            else {
                continue;
            };
            summary.reports_created += 1;

            if report.similarity_score >= self.config.notify_threshold {
                summary.high_similarity_count += 1;
                self.notifier
                    .notify_high_similarity(assignment.lecturer_id, report.id, &assignment.title)
                    .await;
                ReportEntity::mark_notified(db, report.id).await?;
            }
        }

        log::info!(
            "assignment {assignment_id}: {} report(s) created, {} above threshold {:.2}",
            summary.reports_created,
            summary.high_similarity_count,
            self.config.notify_threshold
        );
        Ok(summary)
    }
}
