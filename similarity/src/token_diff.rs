//! Token-diff strategy: word-level LCS alignment with exact matched runs.

use crate::normalize::normalize_text;
use crate::{Comparison, MatchedSegment, round_score};

/// Common runs must exceed this many characters to be worth reporting.
const MIN_SEGMENT_CHARS: usize = 10;

pub(crate) fn compare(text_a: &str, text_b: &str) -> Comparison {
    let norm_a = normalize_text(text_a);
    let norm_b = normalize_text(text_b);

    let total_characters = norm_a.chars().count();
    if total_characters == 0 {
        // Empty first text scores zero regardless of the second.
        return Comparison::default();
    }

    let words_a: Vec<&str> = norm_a.split(' ').filter(|w| !w.is_empty()).collect();
    let words_b: Vec<&str> = norm_b.split(' ').filter(|w| !w.is_empty()).collect();

    let mut segments = Vec::new();
    let mut matched_characters = 0usize;
    let mut pos_a = 0usize;
    let mut pos_b = 0usize;

    for run in diff_runs(&words_a, &words_b) {
        let text = run.words.join(" ");
        let len = text.chars().count();
        match run.kind {
            RunKind::Common => {
                if len > MIN_SEGMENT_CHARS {
                    segments.push(MatchedSegment {
                        text,
                        start_a: pos_a,
                        end_a: pos_a + len,
                        start_b: pos_b,
                        end_b: pos_b + len,
                        similarity: 100.0,
                    });
                }
                matched_characters += len;
                pos_a += len + 1;
                pos_b += len + 1;
            }
            RunKind::OnlyA => pos_a += len + 1,
            RunKind::OnlyB => pos_b += len + 1,
        }
    }

    Comparison {
        score: round_score(matched_characters as f64 / total_characters as f64 * 100.0),
        segments,
        total_characters,
        matched_characters,
    }
}

#[derive(Clone, Copy, PartialEq)]
enum RunKind {
    Common,
    OnlyA,
    OnlyB,
}

struct Run<'a> {
    kind: RunKind,
    words: Vec<&'a str>,
}

/// Word-level diff of the two sequences, as maximal same-kind runs in scan
/// order. Built by backtracking a standard LCS length table.
fn diff_runs<'a>(words_a: &[&'a str], words_b: &[&'a str]) -> Vec<Run<'a>> {
    let n = words_a.len();
    let m = words_b.len();

    // lcs[i][j] = LCS length of words_a[i..] and words_b[j..]
    let mut lcs = vec![0u32; (n + 1) * (m + 1)];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i * (m + 1) + j] = if words_a[i] == words_b[j] {
                lcs[(i + 1) * (m + 1) + j + 1] + 1
            } else {
                lcs[(i + 1) * (m + 1) + j].max(lcs[i * (m + 1) + j + 1])
            };
        }
    }

    let mut runs: Vec<Run<'a>> = Vec::new();
    let mut push = |kind: RunKind, word: &'a str, runs: &mut Vec<Run<'a>>| {
        match runs.last_mut() {
            Some(run) if run.kind == kind => run.words.push(word),
            _ => runs.push(Run {
                kind,
                words: vec![word],
            }),
        }
    };

    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if words_a[i] == words_b[j] {
            push(RunKind::Common, words_a[i], &mut runs);
            i += 1;
            j += 1;
        } else if lcs[(i + 1) * (m + 1) + j] >= lcs[i * (m + 1) + j + 1] {
            push(RunKind::OnlyA, words_a[i], &mut runs);
            i += 1;
        } else {
            push(RunKind::OnlyB, words_b[j], &mut runs);
            j += 1;
        }
    }
    while i < n {
        push(RunKind::OnlyA, words_a[i], &mut runs);
        i += 1;
    }
    while j < m {
        push(RunKind::OnlyB, words_b[j], &mut runs);
        j += 1;
    }

    runs
}
