//! Pairwise comparison over an assignment's extracted submissions.

use db::models::{plagiarism_report::Entity as ReportEntity, submission};
use sea_orm::{DatabaseConnection, DbErr};
use similarity::{Comparison, Strategy};

/// Result of comparing one previously-unseen submission pair.
#[derive(Debug, Clone)]
pub struct ComparisonOutcome {
    pub submission_id_a: i64,
    pub submission_id_b: i64,
    pub comparison: Comparison,
}

/// Enumerates every unordered submission pair exactly once and scores the
/// ones that do not have a report yet.
pub struct PairwiseComparator {
    strategy: Strategy,
}

impl PairwiseComparator {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    /// Compares all `i < j` pairs of the given submissions (each paired with
    /// its extracted text). Pairs that already have a report are skipped, so
    /// re-running an analysis only processes previously-unseen pairs.
    ///
    /// Fewer than two submissions is a legitimate no-op, not an error.
    pub async fn compare_pairs(
        &self,
        db: &DatabaseConnection,
        submissions: &[(submission::Model, String)],
    ) -> Result<Vec<ComparisonOutcome>, DbErr> {
        let mut outcomes = Vec::new();
        if submissions.len() < 2 {
            return Ok(outcomes);
        }

        for i in 0..submissions.len() {
            for j in (i + 1)..submissions.len() {
                let (sub_a, text_a) = &submissions[i];
                let (sub_b, text_b) = &submissions[j];

                if ReportEntity::exists_for_pair(db, sub_a.id, sub_b.id).await? {
                    log::debug!(
                        "pair ({}, {}) already has a report, skipping",
                        sub_a.id,
                        sub_b.id
                    );
                    continue;
                }

                let comparison = similarity::compare(text_a, text_b, self.strategy);
                log::info!(
                    "similarity between submissions {} and {}: {:.2}%",
                    sub_a.id,
                    sub_b.id,
                    comparison.score
                );

                outcomes.push(ComparisonOutcome {
                    submission_id_a: sub_a.id,
                    submission_id_b: sub_b.id,
                    comparison,
                });
            }
        }

        Ok(outcomes)
    }
}
