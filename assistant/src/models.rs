//! Request and response types for the HTTP API.

use nuit_retrieval::RetrievalResult;
use serde::{Deserialize, Serialize};

/// Response language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    Ar,
}

impl Language {
    /// Language name as written in the prompt
    pub fn label(&self) -> &'static str {
        match self {
            Language::Fr => "français",
            Language::Ar => "arabe",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default)]
    pub language: Language,
    /// Client timestamp, accepted and ignored
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// FAQ entry returned as an answer source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFaq {
    pub id: i64,
    pub question_fr: String,
    pub answer_fr: String,
    pub question_ar: Option<String>,
    pub answer_ar: Option<String>,
    pub category: Option<String>,
    pub similarity: Option<f32>,
}

impl From<&RetrievalResult> for SourceFaq {
    fn from(result: &RetrievalResult) -> Self {
        let entry = &result.entry;
        Self {
            id: entry.id,
            question_fr: entry.question_fr.clone(),
            answer_fr: entry.answer_fr.clone(),
            question_ar: entry.question_ar.clone(),
            answer_ar: entry.answer_ar.clone(),
            category: entry.category.clone(),
            similarity: Some(result.similarity),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    pub sources: Vec<SourceFaq>,
    pub confidence: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
