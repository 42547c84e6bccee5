//! Shingle/Jaccard strategy: word 3-gram set overlap.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::normalize::normalize_text;
use crate::{Comparison, MatchedSegment, round_score};

/// Words per shingle window.
const SHINGLE_SIZE: usize = 3;
/// Sentence pairs scoring above this are recorded as evidence.
const SENTENCE_MATCH_THRESHOLD: f64 = 70.0;
/// Sentences at or below this length carry too little signal to compare.
const MIN_SENTENCE_LEN: usize = 20;
/// Evidence cap per report.
const MAX_PASSAGES: usize = 10;

static SENTENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+").unwrap());

pub(crate) fn compare(text_a: &str, text_b: &str) -> Comparison {
    let norm_a = normalize_text(text_a);
    let norm_b = normalize_text(text_b);

    let shingles_a = shingle_set(&norm_a);
    let shingles_b = shingle_set(&norm_b);

    let intersection = shingles_a.intersection(&shingles_b).count();
    let union = shingles_a.union(&shingles_b).count();

    let score = if union == 0 {
        0.0
    } else {
        round_score(intersection as f64 / union as f64 * 100.0)
    };

    // Sentence-pair evidence is informational; it never feeds the score.
    let segments = if intersection > 0 {
        matched_sentences(text_a, text_b)
    } else {
        Vec::new()
    };

    Comparison {
        score,
        segments,
        total_characters: union,
        matched_characters: intersection,
    }
}

/// All word n-gram windows (stride 1) over the normalized text, as a set.
fn shingle_set(normalized: &str) -> HashSet<String> {
    let words: Vec<&str> = normalized.split(' ').filter(|w| !w.is_empty()).collect();
    words
        .windows(SHINGLE_SIZE)
        .map(|window| window.join(" "))
        .collect()
}

/// Jaccard similarity (0–100) of two already-normalized texts.
fn jaccard(norm_a: &str, norm_b: &str) -> f64 {
    let a = shingle_set(norm_a);
    let b = shingle_set(norm_b);
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    round_score(a.intersection(&b).count() as f64 / union as f64 * 100.0)
}

/// Scans both raw texts sentence-by-sentence and records, for each sentence of
/// text A, the first sentence of text B it matches above the threshold.
/// Deduplicated by sentence text and capped at [`MAX_PASSAGES`].
fn matched_sentences(text_a: &str, text_b: &str) -> Vec<MatchedSegment> {
    let sentences_b: Vec<regex::Match> = SENTENCE_RE.find_iter(text_b).collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut segments = Vec::new();

    for sentence_a in SENTENCE_RE.find_iter(text_a) {
        if segments.len() == MAX_PASSAGES {
            break;
        }
        if sentence_a.as_str().trim().len() <= MIN_SENTENCE_LEN {
            continue;
        }
        let norm_a = normalize_text(sentence_a.as_str());

        for sentence_b in &sentences_b {
            if sentence_b.as_str().trim().len() <= MIN_SENTENCE_LEN {
                continue;
            }
            let similarity = jaccard(&norm_a, &normalize_text(sentence_b.as_str()));
            if similarity > SENTENCE_MATCH_THRESHOLD {
                let text = sentence_a.as_str().trim().to_string();
                if seen.insert(text.clone()) {
                    segments.push(MatchedSegment {
                        text,
                        start_a: char_offset(text_a, sentence_a.start()),
                        end_a: char_offset(text_a, sentence_a.end()),
                        start_b: char_offset(text_b, sentence_b.start()),
                        end_b: char_offset(text_b, sentence_b.end()),
                        similarity,
                    });
                }
                break;
            }
        }
    }

    segments
}

fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}
