//! Answer confidence derived from retrieval quality

use crate::search::RetrievalResult;

/// Best similarity among results, 0 when there are none
pub fn max_similarity(results: &[RetrievalResult]) -> f32 {
    results
        .iter()
        .map(|r| r.similarity)
        .fold(0.0_f32, f32::max)
}

/// Confidence reported alongside a generated answer.
///
/// A non-blank answer is never reported below `weak_threshold`; a blank
/// answer always scores 0.
pub fn confidence(results: &[RetrievalResult], answer: &str, weak_threshold: f32) -> f32 {
    if answer.trim().is_empty() {
        return 0.0;
    }
    max_similarity(results).max(weak_threshold)
}
