//! Embedding module for semantic search
//!
//! Hash-based static embeddings: no model files, no learned weights.

mod engine;
mod hash;

pub use engine::{cosine_similarity, dot, l2_norm, HashEmbedder, DEFAULT_DIMENSION};
pub use hash::{bucket, stable_hash, tokenize};
