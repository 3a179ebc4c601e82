//! Error types for LinkStash operations.
//!
//! This module defines the main error type [`StashError`] which represents
//! all possible errors that can occur while fetching a page, extracting its
//! metadata, and classifying it.

use thiserror::Error;

/// Main error type for the extraction-and-classification pipeline.
///
/// # Example
///
/// ```rust
/// use linkstash_core::{StashError, validate_url};
///
/// match validate_url("ftp://example.com") {
///     Ok(url) => println!("ok: {}", url),
///     Err(StashError::InvalidUrl(msg)) => println!("rejected: {}", msg),
///     Err(e) => println!("error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum StashError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps network errors, DNS failures, connection issues, and other
    /// transport-level problems.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The shared fetch deadline expired.
    ///
    /// The deadline covers the whole profile sequence, not a single attempt.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or uses a non-HTTP scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The upstream server answered with a non-success status.
    #[error("Upstream returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    /// Every request profile was tried and none produced a 2xx response.
    ///
    /// Carries the last per-attempt error so callers can log the reason
    /// the final profile gave up.
    #[error("All fetch attempts failed for {url}: {last}")]
    FetchExhausted { url: String, last: String },

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParse(String),

    /// The LLM endpoint was reached but answered with an error.
    #[error("LLM request failed: {0}")]
    LlmApi(String),

    /// The LLM answered, but the payload was not the expected JSON.
    #[error("Unparseable LLM response: {0}")]
    LlmParse(String),

    /// Missing or invalid configuration (API key, connection string).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Vocabulary storage errors.
    ///
    /// Callers on the categorize path swallow and log these; they must
    /// never abort the primary response.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for [`StashError`].
pub type Result<T> = std::result::Result<T, StashError>;
