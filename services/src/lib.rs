//! Plagiarism analysis pipeline: extraction, pairwise comparison,
//! report persistence and high-similarity notification.

pub mod analysis;
pub mod comparator;
pub mod error;
pub mod extraction;
pub mod notification;

pub use analysis::{AnalysisConfig, AnalysisService, AnalysisSummary};
pub use comparator::{ComparisonOutcome, PairwiseComparator};
pub use error::{AnalysisError, ExtractionError};
pub use extraction::{FileTextExtractor, TextExtractor};
pub use notification::{LogNotifier, NotificationSink};
