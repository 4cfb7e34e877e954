//! Similarity ranking
//!
//! Turns a row of cosine scores into a top-k, thresholded ranking.

use serde::{Deserialize, Serialize};

use crate::entry::KnowledgeEntry;
use crate::error::{Result, RetrievalError};

/// Default number of entries forwarded as generation context
pub const DEFAULT_TOP_K: usize = 3;

/// Default weak-match threshold
pub const DEFAULT_MIN_SIMILARITY: f32 = 0.2;

/// Search configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum results to return
    pub top_k: usize,
    /// Scores below this are dropped
    pub min_similarity: f32,
}

impl SearchConfig {
    pub fn new(top_k: usize, min_similarity: f32) -> Self {
        Self {
            top_k,
            min_similarity,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(RetrievalError::InvalidTopK(self.top_k));
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            min_similarity: DEFAULT_MIN_SIMILARITY,
        }
    }
}

/// An entry matched by a query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalResult {
    pub entry: KnowledgeEntry,
    /// Cosine similarity with the query
    pub similarity: f32,
}

/// Rank row scores: descending, ties keep corpus order, at most `top_k`,
/// nothing below `min_similarity`.
///
/// Returns `(row, score)` pairs.
pub fn rank(scores: &[f32], config: &SearchConfig) -> Vec<(usize, f32)> {
    let mut ranked: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();

    // Stable sort, so equal scores stay in row order
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(config.top_k);
    ranked.retain(|(_, score)| *score >= config.min_similarity);
    ranked
}
