//! Text similarity scoring for pairwise plagiarism detection.
//!
//! Two interchangeable strategies sit behind [`compare`]:
//!
//! - [`Strategy::Shingle`] — Jaccard similarity over word 3-gram sets.
//!   Symmetric and tolerant of reordering; evidence is sentence-level and
//!   informational only.
//! - [`Strategy::TokenDiff`] — word-level LCS alignment. Produces exact,
//!   offset-addressable matched segments; the score is the fraction of the
//!   first text covered by common runs, so it is not symmetric when the two
//!   texts differ greatly in length.
//!
//! A deployment picks one strategy and uses it for every comparison.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub mod normalize;
mod shingle;
mod token_diff;

pub use normalize::normalize_text;

/// Scoring strategy used for every comparison within one deployment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Shingle,
    TokenDiff,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shingle" | "jaccard" => Ok(Strategy::Shingle),
            "token_diff" | "token-diff" | "diff" => Ok(Strategy::TokenDiff),
            other => Err(format!("invalid similarity strategy: {other}")),
        }
    }
}

/// A contiguous span of text shared by both documents.
///
/// Offsets are character offsets into the text the strategy scanned: the
/// normalized form for token-diff runs, the raw text for shingle sentence
/// evidence (sentence boundaries do not survive normalization). Exact-common
/// runs carry `similarity == 100.0`; sentence-level evidence carries the
/// graded sentence-pair score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedSegment {
    pub text: String,
    pub start_a: usize,
    pub end_a: usize,
    pub start_b: usize,
    pub end_b: usize,
    pub similarity: f64,
}

/// Outcome of comparing two documents.
///
/// `score` is always reproducible from the counters:
/// `matched_characters / total_characters * 100`, rounded to two decimals
/// (for the shingle strategy the counters hold shingle-set sizes rather than
/// character counts, with the same ratio semantics).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub score: f64,
    pub segments: Vec<MatchedSegment>,
    pub total_characters: usize,
    pub matched_characters: usize,
}

/// Compares two raw extracted texts and returns a similarity score in
/// `[0, 100]` (two decimals) plus matched-segment evidence.
///
/// Normalization happens internally: scoring always runs over the
/// canonical form of each text, while sentence-level evidence is located
/// against the raw text (sentence boundaries do not survive normalization).
///
/// Empty or too-short inputs score 0; there is no error path.
pub fn compare(text_a: &str, text_b: &str, strategy: Strategy) -> Comparison {
    match strategy {
        Strategy::Shingle => shingle::compare(text_a, text_b),
        Strategy::TokenDiff => token_diff::compare(text_a, text_b),
    }
}

/// Clamps to `[0, 100]` and rounds to two decimal places.
pub(crate) fn round_score(raw: f64) -> f64 {
    (raw.clamp(0.0, 100.0) * 100.0).round() / 100.0
}
