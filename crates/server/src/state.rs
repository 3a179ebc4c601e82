//! Shared application state.

use std::sync::Arc;

use linkstash_core::{Classifier, FetchConfig, VocabularyStore};

pub struct AppState {
    /// Profile cascade and deadline for generic page fetches.
    pub fetch: FetchConfig,
    /// LLM-backed classifier; keyless instances make /api/categorize
    /// report itself unconfigured.
    pub classifier: Classifier,
    pub vocabulary: Arc<dyn VocabularyStore>,
}

impl AppState {
    /// State for tests: keyless by default, in-memory vocabulary.
    #[cfg(test)]
    pub fn for_tests(classifier: Classifier) -> Arc<Self> {
        Arc::new(Self {
            fetch: FetchConfig::default(),
            classifier,
            vocabulary: Arc::new(linkstash_core::MemoryVocabulary::new()),
        })
    }
}
