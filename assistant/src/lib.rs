//! Nuit de l'Info Assistant Server Library
//!
//! HTTP layer around the `nuit-retrieval` core: retrieves FAQ context for a
//! question, asks an OpenRouter model for a grounded answer, and reports a
//! retrieval-based confidence.

pub mod config;
pub mod error;
pub mod handlers;
pub mod llm;
pub mod models;
pub mod prompt;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::AssistantConfig;
pub use error::AssistantError;
pub use state::AppState;

/// API routes with permissive CORS and request tracing
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/chat", post(handlers::chat))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
