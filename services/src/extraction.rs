//! Text extraction contract and the file-backed default.

use async_trait::async_trait;
use db::models::submission;
use std::path::PathBuf;

use crate::error::ExtractionError;

/// Produces the raw text of a submission's document.
///
/// Implementations wrap whatever converter the deployment uses (plain files,
/// a PDF extractor, an external service). Failures are per-submission and
/// never abort an analysis run.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, submission: &submission::Model)
    -> Result<String, ExtractionError>;
}

/// Reads the submission's document from the storage root as UTF-8 text.
pub struct FileTextExtractor {
    storage_root: PathBuf,
}

impl FileTextExtractor {
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
        }
    }
}

#[async_trait]
impl TextExtractor for FileTextExtractor {
    async fn extract_text(
        &self,
        submission: &submission::Model,
    ) -> Result<String, ExtractionError> {
        let path = self.storage_root.join(&submission.file_path);
        let bytes = tokio::fs::read(&path).await?;
        String::from_utf8(bytes).map_err(|_| ExtractionError::Unreadable)
    }
}
