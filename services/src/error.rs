use std::time::Duration;
use thiserror::Error;

/// A submission's document could not be turned into text.
///
/// Always recovered locally: the affected submission is dropped from the
/// current run and every pair involving it is skipped.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("document is not valid UTF-8 text")]
    Unreadable,

    #[error("text extraction timed out after {0:?}")]
    Timeout(Duration),
}

/// Failure of an analysis operation as surfaced to the caller.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("assignment {0} not found")]
    AssignmentNotFound(i64),

    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
}
