//! Error types for nuit-retrieval

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or querying the corpus index
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Corpus file could not be read
    #[error("Failed to read corpus {path}: {source}")]
    CorpusRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Corpus file is not a valid FAQ document
    #[error("Malformed corpus {path}: {source}")]
    CorpusParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Corpus content violates an invariant (empty, duplicate ids, ...)
    #[error("Invalid corpus: {0}")]
    Corpus(String),

    /// Corpus file could not be located
    #[error("Corpus not found: {0}")]
    CorpusNotFound(String),

    /// Embedding dimension must be positive
    #[error("Invalid embedding dimension: {0}")]
    InvalidDimension(usize),

    /// Search asked for zero results
    #[error("Invalid top_k: {0} (must be at least 1)")]
    InvalidTopK(usize),
}

impl RetrievalError {
    /// Create an invalid corpus error
    pub fn corpus(msg: impl Into<String>) -> Self {
        Self::Corpus(msg.into())
    }

    /// Create a corpus not found error
    pub fn corpus_not_found(msg: impl Into<String>) -> Self {
        Self::CorpusNotFound(msg.into())
    }
}

/// Result type for retrieval operations
pub type Result<T> = std::result::Result<T, RetrievalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_top_k_display() {
        let err = RetrievalError::InvalidTopK(0);
        assert_eq!(err.to_string(), "Invalid top_k: 0 (must be at least 1)");
    }

    #[test]
    fn test_corpus_read_mentions_path() {
        let err = RetrievalError::CorpusRead {
            path: PathBuf::from("/tmp/faqs.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/faqs.json"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_corpus_read_keeps_io_source() {
        use std::error::Error;

        let err = RetrievalError::CorpusRead {
            path: PathBuf::from("faqs.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "denied");
    }
}
