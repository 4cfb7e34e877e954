use nuit_retrieval::{CorpusIndex, SearchConfig};
use std::sync::Arc;

use crate::config::AssistantConfig;
use crate::error::AssistantResult;
use crate::llm::AnswerGenerator;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<CorpusIndex>,
    pub generator: Arc<dyn AnswerGenerator>,
    pub search: SearchConfig,
}

impl AppState {
    /// Fails when the configured search settings are unusable (zero top-k).
    pub fn new(
        config: &AssistantConfig,
        index: Arc<CorpusIndex>,
        generator: Arc<dyn AnswerGenerator>,
    ) -> AssistantResult<Self> {
        let search = config.search_config();
        search.validate()?;
        Ok(Self {
            index,
            generator,
            search,
        })
    }
}
