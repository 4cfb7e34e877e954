//! Nuit de l'Info Assistant Entry Point
//!
//! Two modes:
//! - Server mode (default): serves the HTTP API
//! - Search mode (--search): prints retrieval results as JSON and exits

use anyhow::Context;
use clap::Parser;
use nuit_retrieval::{find_corpus_path, CorpusIndex, HashEmbedder};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nuit_assistant::llm::OpenRouterClient;
use nuit_assistant::{AppState, AssistantConfig};

#[derive(Parser)]
#[command(name = "nuit-assistant")]
#[command(about = "Nuit de l'Info assistant with FAQ retrieval")]
#[command(version)]
struct Args {
    /// FAQ corpus file (defaults to NUIT_FAQS_PATH or a bundled location)
    #[arg(long, short)]
    corpus: Option<PathBuf>,

    /// Address to bind the HTTP server to
    #[arg(long)]
    bind: Option<String>,

    /// Number of FAQ entries used as context
    #[arg(long)]
    top_k: Option<usize>,

    /// Run a single retrieval query, print the matches, and exit
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nuit_assistant=info,nuit_retrieval=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = AssistantConfig::from_env();
    if let Some(corpus) = args.corpus {
        config.faqs_path = Some(corpus);
    }
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(top_k) = args.top_k {
        config.max_context_faqs = top_k;
    }

    // Reject unusable search settings before doing any work
    let search = config.search_config();
    search.validate()?;

    let corpus_path = match config.faqs_path.clone() {
        Some(path) => path,
        None => find_corpus_path(None)?,
    };
    tracing::info!("Corpus: {}", corpus_path.display());

    let embedder = HashEmbedder::new(config.embedding_dim)?;
    let index = Arc::new(CorpusIndex::from_path(&corpus_path, embedder));

    // Preload so a bad corpus stops startup instead of failing requests
    index
        .load()
        .with_context(|| format!("Failed to load corpus {}", corpus_path.display()))?;

    if let Some(query) = args.search {
        let results = index.search_with(&query, &search)?;
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if config.llm.api_key.is_none() {
        tracing::warn!("OPENROUTER_API_KEY not set, /api/chat will fail until it is provided");
    }
    tracing::info!("LLM: {} ({})", config.llm.model, config.llm.api_base);

    let generator = Arc::new(OpenRouterClient::new(config.llm.clone())?);
    let state = AppState::new(&config, index, generator)?;
    let app = nuit_assistant::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
