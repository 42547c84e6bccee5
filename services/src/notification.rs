//! High-similarity notification contract.

use async_trait::async_trait;

/// Receives "report X needs a reviewer's attention" events.
///
/// Delivery transport (websocket, email, in-app) lives outside this crate;
/// the orchestrator only promises to call this at most once per report, right
/// before flagging the report as notified.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify_high_similarity(
        &self,
        reviewer_id: i64,
        report_id: i64,
        assignment_title: &str,
    );
}

/// Default sink: records the event in the application log.
pub struct LogNotifier;

#[async_trait]
impl NotificationSink for LogNotifier {
    async fn notify_high_similarity(
        &self,
        reviewer_id: i64,
        report_id: i64,
        assignment_title: &str,
    ) {
        log::info!(
            "high-similarity report {report_id} on '{assignment_title}' flagged for reviewer {reviewer_id}"
        );
    }
}
