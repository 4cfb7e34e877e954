//! Hash embedder
//!
//! Maps text to a fixed-dimension vector from hashed tokens plus a
//! positional-decay term on the neighbouring coordinate.

use super::hash::{bucket, stable_hash, tokenize};
use crate::error::{Result, RetrievalError};

/// Dimension shared with the browser-side embedder
pub const DEFAULT_DIMENSION: usize = 384;

/// Deterministic text embedder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    /// Create an embedder producing `dimension`-long vectors
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(RetrievalError::InvalidDimension(dimension));
        }
        Ok(Self { dimension })
    }

    /// Embed text into an L2-normalized vector.
    ///
    /// Text without tokens yields the zero vector.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let dim = self.dimension;
        let mut acc = vec![0.0_f64; dim];

        for (idx, token) in tokenize(text).iter().enumerate() {
            let pos = bucket(stable_hash(token), dim);
            acc[pos] += 1.0;
            acc[(pos + 1) % dim] += 1.0 / (idx as f64 + 1.0);
        }

        let norm = acc.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm == 0.0 {
            return vec![0.0; dim];
        }
        acc.into_iter().map(|x| (x / norm) as f32).collect()
    }

    /// Batch embed, preserving input order
    pub fn embed_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Vec<f32>> {
        texts.iter().map(|text| self.embed(text.as_ref())).collect()
    }

    /// Get embedding dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
        }
    }
}

/// Cosine similarity for arbitrary vectors.
///
/// Mismatched lengths or a zero norm give 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot(a, b) / (norm_a * norm_b)
    }
}

/// Dot product over the common prefix
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}
