//! LinkStash — bookmark categorization API server.

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod error;
mod routes;
mod state;
mod store;

use linkstash_core::{Classifier, FetchConfig, LlmClient, MemoryVocabulary, VocabularyStore};
use state::AppState;
use store::PostgresVocabulary;

fn resolve_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port = resolve_port();

    // LLM classification requires a key; without one the categorize
    // endpoint reports itself unconfigured (extract-title still works).
    let classifier = match LlmClient::from_env() {
        Ok(client) => {
            info!(model = client.model(), "LLM classification enabled");
            Classifier::new(Some(client))
        }
        Err(_) => {
            warn!("OPENAI_API_KEY not set; /api/categorize will return 500");
            Classifier::new(None)
        }
    };

    // Hosted vocabulary store when DATABASE_URL is present, in-memory
    // otherwise.
    let vocabulary: Arc<dyn VocabularyStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let store = PostgresVocabulary::connect(&database_url).await?;
            info!("vocabulary store: postgres");
            Arc::new(store)
        }
        Err(_) => {
            warn!("DATABASE_URL not set; vocabulary kept in memory only");
            Arc::new(MemoryVocabulary::new())
        }
    };

    let state = Arc::new(AppState {
        fetch: FetchConfig::default(),
        classifier,
        vocabulary,
    });

    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("LinkStash server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
