pub mod classify;
pub mod error;
pub mod fetch;
pub mod heuristic;
pub mod llm;
pub mod metadata;
pub mod parse;
pub mod pipeline;
pub mod sites;
pub mod vocabulary;

pub use classify::{Category, Classification, Classifier, LlmReply, normalize_tags, parse_llm_reply};
pub use error::{Result, StashError};
pub use fetch::{DEFAULT_PROFILES, FetchConfig, FetchProfile, fetch_url, fetch_with_profile, validate_url};
pub use heuristic::{heuristic_category, heuristic_tags};
pub use llm::{LlmClient, LlmConfig};
pub use metadata::{PageMetadata, extract_metadata};
pub use parse::Document;
pub use pipeline::{CategorizedPage, categorize_page, extract_page, extract_page_lossless};
pub use vocabulary::{
    COLOR_PALETTE, MemoryVocabulary, VocabularyRecord, VocabularyStore, palette_color, sync_vocabulary,
};
