//! Nuit de l'Info Retrieval Core
//!
//! FAQ retrieval for the Nuit de l'Info assistant: deterministic hash
//! embeddings, a built-once corpus index, and top-k cosine search.
//!
//! ## Features
//!
//! - **Hash embeddings** - Token hashing plus positional decay, bit-compatible with the browser embedder
//! - **Corpus index** - Entries and embedding matrix built together once, read-only afterwards
//! - **Thresholded search** - Top-k by cosine similarity, weak matches dropped, ties in corpus order
//! - **Confidence policy** - Retrieval-based confidence for generated answers
//!
//! ## Example
//!
//! ```no_run
//! use nuit_retrieval::{CorpusIndex, HashEmbedder};
//!
//! let index = CorpusIndex::from_path("data/faqs.json", HashEmbedder::default());
//! index.load()?;
//!
//! for hit in index.search("Quand est la nuit de l'info ?", 3, 0.2)? {
//!     println!("{:.3} {}", hit.similarity, hit.entry.question_fr);
//! }
//! # Ok::<(), nuit_retrieval::RetrievalError>(())
//! ```

pub mod confidence;
pub mod discovery;
pub mod embedding;
pub mod entry;
pub mod error;
pub mod index;
pub mod search;

// Re-exports for convenience
pub use confidence::{confidence, max_similarity};
pub use discovery::{find_corpus_path, find_corpus_path_with};
pub use embedding::{cosine_similarity, stable_hash, HashEmbedder, DEFAULT_DIMENSION};
pub use entry::{CorpusFile, KnowledgeEntry};
pub use error::{Result, RetrievalError};
pub use index::{CorpusIndex, CorpusSource};
pub use search::{RetrievalResult, SearchConfig, DEFAULT_MIN_SIMILARITY, DEFAULT_TOP_K};
