//! Environment-based configuration.

use nuit_retrieval::{SearchConfig, DEFAULT_DIMENSION, DEFAULT_MIN_SIMILARITY, DEFAULT_TOP_K};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// FAQ corpus file. Discovered at startup when unset.
    pub faqs_path: Option<PathBuf>,
    /// Server bind address
    pub bind_addr: String,
    /// Embedding dimension, shared with the browser-side embedder
    pub embedding_dim: usize,
    /// Weak-match threshold for retrieval and the confidence floor
    pub min_similarity_weak: f32,
    /// Number of FAQ entries forwarded as context
    pub max_context_faqs: usize,
    pub llm: LlmConfig,
}

/// OpenRouter (OpenAI-compatible) chat completion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub api_base: String,
    pub model: String,
    /// Requests fail before reaching the network when this is unset
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            faqs_path: None,
            bind_addr: "0.0.0.0:8000".to_string(),
            embedding_dim: DEFAULT_DIMENSION,
            min_similarity_weak: DEFAULT_MIN_SIMILARITY,
            max_context_faqs: DEFAULT_TOP_K,
            llm: LlmConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://openrouter.ai/api/v1".to_string(),
            model: "mistralai/mistral-7b-instruct:free".to_string(),
            api_key: None,
            timeout_secs: 15,
        }
    }
}

impl AssistantConfig {
    /// Retrieval settings for `/api/chat`
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig::new(self.max_context_faqs, self.min_similarity_weak)
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unparsable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("NUIT_FAQS_PATH") {
            config.faqs_path = Some(PathBuf::from(path));
        }
        if let Some(addr) = lookup("NUIT_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(dim) = lookup("NUIT_EMBEDDING_DIM").and_then(|v| v.parse().ok()) {
            config.embedding_dim = dim;
        }
        if let Some(min) = lookup("NUIT_MIN_SIMILARITY_WEAK").and_then(|v| v.parse().ok()) {
            config.min_similarity_weak = min;
        }
        if let Some(k) = lookup("NUIT_MAX_CONTEXT_FAQS").and_then(|v| v.parse().ok()) {
            config.max_context_faqs = k;
        }

        // LLM config
        if let Some(base) = lookup("OPENROUTER_API_BASE") {
            config.llm.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup("OPENROUTER_MODEL") {
            config.llm.model = model;
        }
        if let Some(key) = lookup("OPENROUTER_API_KEY").filter(|k| !k.trim().is_empty()) {
            config.llm.api_key = Some(key);
        }
        if let Some(secs) = lookup("NUIT_LLM_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            config.llm.timeout_secs = secs;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AssistantConfig::default();
        assert_eq!(config.embedding_dim, 384);
        assert_eq!(config.max_context_faqs, 3);
        assert_eq!(config.min_similarity_weak, 0.2);
        assert_eq!(config.llm.timeout_secs, 15);
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = AssistantConfig::from_lookup(lookup_from(&[
            ("NUIT_FAQS_PATH", "/srv/faqs.json"),
            ("NUIT_MAX_CONTEXT_FAQS", "5"),
            ("NUIT_MIN_SIMILARITY_WEAK", "0.35"),
            ("OPENROUTER_API_BASE", "http://localhost:4000/v1/"),
            ("OPENROUTER_API_KEY", "sk-test"),
        ]));
        assert_eq!(config.faqs_path, Some(PathBuf::from("/srv/faqs.json")));
        assert_eq!(config.max_context_faqs, 5);
        assert_eq!(config.min_similarity_weak, 0.35);
        assert_eq!(config.llm.api_base, "http://localhost:4000/v1");
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_invalid_numbers_keep_defaults() {
        let config = AssistantConfig::from_lookup(lookup_from(&[
            ("NUIT_EMBEDDING_DIM", "lots"),
            ("NUIT_LLM_TIMEOUT_SECS", "-3"),
        ]));
        assert_eq!(config.embedding_dim, 384);
        assert_eq!(config.llm.timeout_secs, 15);
    }

    #[test]
    fn test_zero_context_faqs_fails_validation() {
        let config = AssistantConfig::from_lookup(lookup_from(&[("NUIT_MAX_CONTEXT_FAQS", "0")]));
        assert_eq!(config.search_config(), SearchConfig::new(0, 0.2));
        assert!(config.search_config().validate().is_err());
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let config = AssistantConfig::from_lookup(lookup_from(&[("OPENROUTER_API_KEY", "  ")]));
        assert!(config.llm.api_key.is_none());
    }
}
