//! Retrieval-augmented chat endpoint.

use axum::extract::State;
use axum::Json;
use nuit_retrieval::{confidence, KnowledgeEntry};

use crate::error::{AssistantError, AssistantResult};
use crate::models::{ChatRequest, ChatResponse, SourceFaq};
use crate::state::AppState;

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> AssistantResult<Json<ChatResponse>> {
    answer(&state, req).await.map(Json)
}

/// Retrieve context, generate an answer, and score it.
pub async fn answer(state: &AppState, req: ChatRequest) -> AssistantResult<ChatResponse> {
    let query = req.query.trim();
    if query.is_empty() {
        return Err(AssistantError::EmptyQuery);
    }

    let results = state.index.search_with(query, &state.search)?;
    tracing::info!(
        "Retrieved {} FAQ entries for {:?} query",
        results.len(),
        req.language
    );

    let entries: Vec<KnowledgeEntry> = results.iter().map(|r| r.entry.clone()).collect();
    let answer = state
        .generator
        .generate(query, req.language, &entries)
        .await?;

    let confidence = confidence(&results, &answer, state.search.min_similarity);

    Ok(ChatResponse {
        answer,
        sources: results.iter().map(SourceFaq::from).collect(),
        confidence,
    })
}
