//! Knowledge entry types and the corpus file format
//!
//! A corpus file is a JSON document holding an ordered `faqs` array. Extra
//! top-level metadata written by the authoring tooling is ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, RetrievalError};

/// One retrievable FAQ entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Unique identifier within the corpus
    pub id: i64,
    /// Question in the primary language (French)
    pub question_fr: String,
    /// Answer in the primary language (French)
    pub answer_fr: String,
    /// Question in the secondary language (Arabic)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_ar: Option<String>,
    /// Answer in the secondary language (Arabic)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_ar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Keywords for the offline keyword mode. Not used for ranking.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Priority for the offline keyword mode. Not used for ranking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offline_priority: Option<i32>,
}

impl KnowledgeEntry {
    pub fn new(id: i64, question_fr: impl Into<String>, answer_fr: impl Into<String>) -> Self {
        Self {
            id,
            question_fr: question_fr.into(),
            answer_fr: answer_fr.into(),
            question_ar: None,
            answer_ar: None,
            category: None,
            keywords: Vec::new(),
            offline_priority: None,
        }
    }

    pub fn with_arabic(mut self, question: impl Into<String>, answer: impl Into<String>) -> Self {
        self.question_ar = Some(question.into());
        self.answer_ar = Some(answer.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Text the index embeds: primary-language question and answer.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.question_fr, self.answer_fr)
    }

    /// Arabic question, or `None` when missing or blank
    pub fn question_ar(&self) -> Option<&str> {
        non_blank(self.question_ar.as_deref())
    }

    /// Arabic answer, or `None` when missing or blank
    pub fn answer_ar(&self) -> Option<&str> {
        non_blank(self.answer_ar.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// On-disk corpus document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_faqs: Option<usize>,
    pub faqs: Vec<KnowledgeEntry>,
}

impl CorpusFile {
    /// Read and validate a corpus file.
    ///
    /// Fails on missing or unreadable files, malformed JSON, an empty `faqs`
    /// array, or duplicate entry ids.
    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| RetrievalError::CorpusRead {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus: CorpusFile =
            serde_json::from_str(&data).map_err(|source| RetrievalError::CorpusParse {
                path: path.to_path_buf(),
                source,
            })?;

        if corpus.faqs.is_empty() {
            return Err(RetrievalError::corpus(format!(
                "{} contains no entries",
                path.display()
            )));
        }
        validate_unique_ids(&corpus.faqs)?;

        if let Some(total) = corpus.total_faqs {
            if total != corpus.faqs.len() {
                log::warn!(
                    "Corpus {} declares total_faqs={} but holds {} entries",
                    path.display(),
                    total,
                    corpus.faqs.len()
                );
            }
        }

        Ok(corpus)
    }
}

/// Reject corpora where two entries share an id
pub fn validate_unique_ids(entries: &[KnowledgeEntry]) -> Result<()> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.id) {
            return Err(RetrievalError::corpus(format!(
                "duplicate entry id {}",
                entry.id
            )));
        }
    }
    Ok(())
}
