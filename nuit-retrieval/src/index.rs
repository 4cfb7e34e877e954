//! Corpus index
//!
//! Holds the FAQ entries and their embedding matrix. The index is built once,
//! on the first `load()` or `search()`, and is read-only afterwards. Entries
//! and matrix rows live in a single snapshot so they can only ever be
//! replaced together.

use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::embedding::{dot, l2_norm, HashEmbedder};
use crate::entry::{validate_unique_ids, CorpusFile, KnowledgeEntry};
use crate::error::Result;
use crate::search::{rank, RetrievalResult, SearchConfig};

/// Where the index reads its entries from
#[derive(Debug, Clone)]
pub enum CorpusSource {
    /// JSON corpus file, read on first load
    File(PathBuf),
    /// Entries supplied in memory
    Entries(Vec<KnowledgeEntry>),
}

/// Entries paired with their embeddings, row for row
struct IndexSnapshot {
    entries: Vec<KnowledgeEntry>,
    matrix: Vec<Vec<f32>>,
}

impl IndexSnapshot {
    fn build(entries: Vec<KnowledgeEntry>, embedder: &HashEmbedder) -> Self {
        let texts: Vec<String> = entries.iter().map(KnowledgeEntry::searchable_text).collect();
        let matrix = embedder.embed_batch(&texts);
        Self { entries, matrix }
    }
}

/// Process-wide FAQ index with cosine similarity search
pub struct CorpusIndex {
    source: CorpusSource,
    embedder: HashEmbedder,
    snapshot: RwLock<Option<Arc<IndexSnapshot>>>,
}

impl CorpusIndex {
    /// Create an index over `source`. Nothing is read until `load()`.
    pub fn new(source: CorpusSource, embedder: HashEmbedder) -> Self {
        Self {
            source,
            embedder,
            snapshot: RwLock::new(None),
        }
    }

    /// Index backed by a corpus file
    pub fn from_path(path: impl AsRef<Path>, embedder: HashEmbedder) -> Self {
        Self::new(CorpusSource::File(path.as_ref().to_path_buf()), embedder)
    }

    /// Index over in-memory entries
    pub fn from_entries(entries: Vec<KnowledgeEntry>, embedder: HashEmbedder) -> Self {
        Self::new(CorpusSource::Entries(entries), embedder)
    }

    /// Build the index if it is not built yet.
    ///
    /// Concurrent callers race on a double-checked lock, so at most one
    /// build runs. Later calls return immediately.
    pub fn load(&self) -> Result<()> {
        self.snapshot().map(|_| ())
    }

    /// Search the corpus for `query`
    ///
    /// # Arguments
    /// * `query` - Free text question
    /// * `top_k` - Maximum number of results, at least 1
    /// * `min_similarity` - Results scoring below this are dropped
    ///
    /// # Returns
    /// Results in descending similarity. Empty when the query has no
    /// tokens or nothing clears the threshold.
    pub fn search(
        &self,
        query: &str,
        top_k: usize,
        min_similarity: f32,
    ) -> Result<Vec<RetrievalResult>> {
        self.search_with(query, &SearchConfig::new(top_k, min_similarity))
    }

    /// Search with a prepared configuration
    pub fn search_with(&self, query: &str, config: &SearchConfig) -> Result<Vec<RetrievalResult>> {
        config.validate()?;
        let snapshot = self.snapshot()?;

        let query_vec = self.embedder.embed(query);
        if l2_norm(&query_vec) == 0.0 {
            log::debug!("Query has no tokens, skipping search");
            return Ok(Vec::new());
        }

        // Rows are unit length, so the dot product is the cosine
        let scores: Vec<f32> = snapshot
            .matrix
            .iter()
            .map(|row| dot(row, &query_vec))
            .collect();

        let results: Vec<RetrievalResult> = rank(&scores, config)
            .into_iter()
            .map(|(row, similarity)| RetrievalResult {
                entry: snapshot.entries[row].clone(),
                similarity,
            })
            .collect();

        log::debug!(
            "Search matched {} of {} entries (top_k={}, min_similarity={})",
            results.len(),
            snapshot.entries.len(),
            config.top_k,
            config.min_similarity
        );

        Ok(results)
    }

    /// Look up an entry by id
    pub fn entry(&self, id: i64) -> Result<Option<KnowledgeEntry>> {
        let snapshot = self.snapshot()?;
        Ok(snapshot.entries.iter().find(|e| e.id == id).cloned())
    }

    /// Number of indexed entries (loads the index)
    pub fn len(&self) -> Result<usize> {
        Ok(self.snapshot()?.entries.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Whether the index has been built
    pub fn is_loaded(&self) -> bool {
        self.snapshot.read().is_some()
    }

    /// Get embedding dimension
    pub fn dimension(&self) -> usize {
        self.embedder.dimension()
    }

    fn snapshot(&self) -> Result<Arc<IndexSnapshot>> {
        if let Some(snapshot) = self.snapshot.read().as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let mut guard = self.snapshot.write();
        if let Some(snapshot) = guard.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let entries = self.read_source()?;
        let snapshot = Arc::new(IndexSnapshot::build(entries, &self.embedder));
        log::info!(
            "Corpus index ready ({} entries, {}d)",
            snapshot.entries.len(),
            self.embedder.dimension()
        );

        *guard = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    fn read_source(&self) -> Result<Vec<KnowledgeEntry>> {
        match &self.source {
            CorpusSource::File(path) => {
                let corpus = CorpusFile::read(path)?;
                log::info!(
                    "Loaded corpus {} (version {})",
                    path.display(),
                    corpus.version.as_deref().unwrap_or("unknown")
                );
                Ok(corpus.faqs)
            }
            CorpusSource::Entries(entries) => {
                validate_unique_ids(entries)?;
                Ok(entries.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RetrievalError;

    const DATE_QUESTION: &str = "Quand a lieu la Nuit de l'Info 2025 ?";
    const DATE_ANSWER: &str = "La Nuit de l'Info 2025 se déroule les 4 et 5 décembre 2025.";

    fn sample_entries() -> Vec<KnowledgeEntry> {
        vec![
            KnowledgeEntry::new(
                1,
                "Comment s'inscrire ?",
                "Les inscriptions se font en ligne sur le site officiel avant la date limite.",
            )
            .with_category("inscription"),
            KnowledgeEntry::new(2, DATE_QUESTION, DATE_ANSWER)
                .with_arabic(
                    "متى تقام ليلة المعلومات 2025؟",
                    "تقام ليلة المعلومات 2025 في 4 و 5 ديسمبر 2025.",
                )
                .with_category("organisation"),
            KnowledgeEntry::new(
                3,
                "À qui s'adresse la Nuit de l'Info ?",
                "La Nuit de l'Info s'adresse à tous les étudiants en informatique.",
            )
            .with_category("general"),
        ]
    }

    fn sample_index() -> CorpusIndex {
        CorpusIndex::from_entries(sample_entries(), HashEmbedder::default())
    }

    #[test]
    fn test_load_is_lazy_and_idempotent() {
        let index = sample_index();
        assert!(!index.is_loaded());
        index.load().unwrap();
        assert!(index.is_loaded());
        index.load().unwrap();
        assert_eq!(index.len().unwrap(), 3);
    }

    #[test]
    fn test_search_loads_implicitly() {
        let index = sample_index();
        let results = index.search("nuit de l'info", 3, 0.0).unwrap();
        assert!(index.is_loaded());
        assert!(!results.is_empty());
    }

    #[test]
    fn test_self_similarity() {
        let index = sample_index();
        let query = format!("{} {}", DATE_QUESTION, DATE_ANSWER);
        let results = index.search(&query, 3, 0.0).unwrap();
        assert_eq!(results[0].entry.id, 2);
        assert!((results[0].similarity - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_near_duplicate_ranks_date_entry_higher() {
        let index = sample_index();
        let results = index.search("Quand est la nuit de l'info ?", 3, 0.0).unwrap();
        let score_of = |id: i64| {
            results
                .iter()
                .find(|r| r.entry.id == id)
                .map(|r| r.similarity)
                .unwrap_or(0.0)
        };
        assert_eq!(results[0].entry.id, 2);
        assert!(score_of(2) > score_of(1));
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let index = sample_index();
        assert!(index.search("", 3, 0.0).unwrap().is_empty());
        assert!(index.search("   ", 3, -1.0).unwrap().is_empty());
    }

    #[test]
    fn test_threshold_excludes_generic_query() {
        let index = sample_index();
        assert!(index.search("bonjour", 3, 0.9).unwrap().is_empty());
    }

    #[test]
    fn test_threshold_monotonicity() {
        let index = sample_index();
        let query = "Quand est la nuit de l'info ?";
        let mut previous = usize::MAX;
        for threshold in [-1.0, 0.0, 0.2, 0.5, 0.7, 0.9, 1.1] {
            let count = index.search(query, 3, threshold).unwrap().len();
            assert!(count <= previous, "threshold {threshold} grew results");
            previous = count;
        }
    }

    #[test]
    fn test_top_k_cap() {
        let index = sample_index();
        for k in 1..=5 {
            let results = index.search("la nuit de l'info", k, -1.0).unwrap();
            assert!(results.len() <= k);
            assert_eq!(results.len(), k.min(3));
        }
    }

    #[test]
    fn test_results_are_descending() {
        let index = sample_index();
        let results = index.search("la nuit de l'info", 3, -1.0).unwrap();
        for pair in results.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let entries = vec![
            KnowledgeEntry::new(10, "même", "texte"),
            KnowledgeEntry::new(11, "même", "texte"),
        ];
        let index = CorpusIndex::from_entries(entries, HashEmbedder::default());
        let results = index.search("même texte", 2, 0.0).unwrap();
        assert_eq!(results[0].entry.id, 10);
        assert_eq!(results[1].entry.id, 11);
        assert_eq!(results[0].similarity, results[1].similarity);
    }

    #[test]
    fn test_zero_top_k_is_rejected() {
        let index = sample_index();
        let err = index.search("nuit", 0, 0.0).unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidTopK(0)));
    }

    #[test]
    fn test_empty_corpus_returns_nothing() {
        let index = CorpusIndex::from_entries(Vec::new(), HashEmbedder::default());
        assert!(index.search("nuit de l'info", 3, -1.0).unwrap().is_empty());
        assert!(index.is_empty().unwrap());
    }

    #[test]
    fn test_duplicate_ids_fail_load() {
        let entries = vec![
            KnowledgeEntry::new(1, "a", "b"),
            KnowledgeEntry::new(1, "c", "d"),
        ];
        let index = CorpusIndex::from_entries(entries, HashEmbedder::default());
        assert!(index.load().is_err());
        assert!(!index.is_loaded());
    }

    #[test]
    fn test_missing_file_fails_loudly() {
        let dir = tempfile::tempdir().unwrap();
        let index = CorpusIndex::from_path(dir.path().join("faqs.json"), HashEmbedder::default());
        assert!(matches!(
            index.search("nuit", 3, 0.0),
            Err(RetrievalError::CorpusRead { .. })
        ));
    }

    #[test]
    fn test_load_from_file_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faqs.json");
        let corpus = serde_json::json!({ "version": "test", "faqs": sample_entries() });
        std::fs::write(&path, serde_json::to_string(&corpus).unwrap()).unwrap();

        let index = CorpusIndex::from_path(&path, HashEmbedder::default());
        index.load().unwrap();
        assert_eq!(index.len().unwrap(), 3);
        assert_eq!(index.entry(2).unwrap().unwrap().question_fr, DATE_QUESTION);
        assert_eq!(index.entry(99).unwrap(), None);
    }

    #[test]
    fn test_snapshot_rows_follow_entries() {
        let embedder = HashEmbedder::default();
        let entries = sample_entries();
        let snapshot = IndexSnapshot::build(entries.clone(), &embedder);

        assert_eq!(snapshot.matrix.len(), entries.len());
        for (entry, row) in entries.iter().zip(&snapshot.matrix) {
            assert_eq!(row, &embedder.embed(&entry.searchable_text()));
        }
    }

    #[test]
    fn test_concurrent_loads_build_one_snapshot() {
        let index = Arc::new(sample_index());
        let barrier = Arc::new(std::sync::Barrier::new(8));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let index = Arc::clone(&index);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    let snapshot = index.snapshot().unwrap();
                    let results = index.search("Quand est la nuit de l'info ?", 1, 0.0).unwrap();
                    (snapshot, results)
                })
            })
            .collect();

        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let current = index.snapshot().unwrap();
        for (snapshot, results) in &outcomes {
            assert!(Arc::ptr_eq(snapshot, &current));
            assert_eq!(results[0].entry.id, 2);
        }
        assert_eq!(index.len().unwrap(), 3);
    }
}
