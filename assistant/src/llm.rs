//! Answer generation through an OpenAI-compatible chat completions API.

use async_trait::async_trait;
use nuit_retrieval::KnowledgeEntry;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::{AssistantError, AssistantResult};
use crate::models::Language;
use crate::prompt::build_prompt;

/// Returned when the model answers with empty content
pub const FALLBACK_ANSWER: &str = "Désolé, je n'ai pas pu générer de réponse pour le moment.";

/// Turns a question and its retrieved context into prose
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(
        &self,
        query: &str,
        language: Language,
        entries: &[KnowledgeEntry],
    ) -> AssistantResult<String>;
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionMessage>,
}

#[derive(Serialize, Deserialize, Default)]
struct ChatCompletionMessage {
    #[serde(default)]
    role: String,
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Deserialize)]
struct ChatCompletionChoice {
    #[serde(default)]
    message: ChatCompletionMessage,
}

/// OpenRouter client
pub struct OpenRouterClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl OpenRouterClient {
    pub fn new(config: LlmConfig) -> AssistantResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl AnswerGenerator for OpenRouterClient {
    async fn generate(
        &self,
        query: &str,
        language: Language,
        entries: &[KnowledgeEntry],
    ) -> AssistantResult<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AssistantError::MissingApiKey)?;

        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatCompletionMessage {
                role: "user".to_string(),
                content: build_prompt(query, language, entries),
            }],
        };

        tracing::debug!(
            "Requesting completion from {} ({} context entries)",
            self.config.model,
            entries.len()
        );

        let resp = self
            .http
            .post(self.completions_url())
            .bearer_auth(api_key)
            .header("HTTP-Referer", "http://localhost:3000/")
            .header("X-Title", "NuitInfoAssistant")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(AssistantError::generation(format!(
                "chat completions returned {status}: {text}"
            )));
        }

        let completion: ChatCompletionResponse = resp.json().await?;
        Ok(extract_answer(completion))
    }
}

fn extract_answer(completion: ChatCompletionResponse) -> String {
    let content = completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .unwrap_or_default();

    let content = content.trim();
    if content.is_empty() {
        FALLBACK_ANSWER.to_string()
    } else {
        content.to_string()
    }
}
