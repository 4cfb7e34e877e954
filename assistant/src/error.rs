//! Error types for the assistant server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nuit_retrieval::RetrievalError;
use thiserror::Error;

/// Errors that can occur while answering a request.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Query is empty")]
    EmptyQuery,

    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("OPENROUTER_API_KEY is not set")]
    MissingApiKey,

    #[error("LLM request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM error: {0}")]
    Generation(String),
}

impl AssistantError {
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AssistantError::EmptyQuery => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AssistantError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

/// Result type alias for assistant operations.
pub type AssistantResult<T> = Result<T, AssistantError>;
