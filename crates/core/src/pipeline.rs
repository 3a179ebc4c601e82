//! Pipeline orchestration: fetch, extract, classify.
//!
//! Two extraction flavors exist because the two API operations promise
//! different things. The categorize path is allowed to fail when a page
//! cannot be retrieved; the extract-title path never fails for a valid
//! URL and synthesizes metadata from the URL itself as a last resort.

use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::classify::{Category, Classifier};
use crate::fetch::{FetchConfig, fetch_url, validate_url};
use crate::metadata::{PageMetadata, extract_metadata};
use crate::sites;
use crate::Result;

/// The assembled result of a categorize call.
#[derive(Debug, Clone, Serialize)]
pub struct CategorizedPage {
    pub category: Category,
    pub tags: Vec<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
}

/// Fetch a page and extract its metadata.
///
/// Site-specific extractors run first and cannot fail; on the generic
/// path a total fetch failure is returned to the caller (the
/// "could not retrieve content" branch).
pub async fn extract_page(url: &str, fetch: &FetchConfig) -> Result<PageMetadata> {
    let parsed = validate_url(url)?;

    if let Some(meta) = sites::try_extract(&parsed).await {
        debug!(url = %url, "site-specific extractor handled page");
        return Ok(meta);
    }

    let html = fetch_url(url, fetch).await?;
    Ok(extract_metadata(&html, &parsed))
}

/// Fetch a page and extract its metadata, never failing for a valid URL.
///
/// On total fetch failure the hostname stands in for the title, so this
/// path always produces something worth saving.
pub async fn extract_page_lossless(url: &str, fetch: &FetchConfig) -> Result<PageMetadata> {
    let parsed = validate_url(url)?;

    if let Some(meta) = sites::try_extract(&parsed).await {
        return Ok(meta);
    }

    match fetch_url(url, fetch).await {
        Ok(html) => Ok(extract_metadata(&html, &parsed)),
        Err(e) => {
            debug!(url = %url, error = %e, "fetch failed, synthesizing metadata from URL");
            Ok(synthetic_from_host(&parsed))
        }
    }
}

/// Full categorize flow: extract, then classify.
pub async fn categorize_page(
    url: &str,
    fetch: &FetchConfig,
    classifier: &Classifier,
) -> Result<CategorizedPage> {
    let parsed = validate_url(url)?;
    let meta = extract_page(url, fetch).await?;

    let hostname = parsed.host_str().unwrap_or_default();
    let classification = classifier
        .classify(&meta.title, meta.description.as_deref().unwrap_or(""), hostname)
        .await;

    Ok(CategorizedPage {
        category: classification.category,
        tags: classification.tags,
        title: meta.title,
        description: meta.description,
        url: url.to_string(),
    })
}

fn synthetic_from_host(url: &Url) -> PageMetadata {
    let host = url.host_str().unwrap_or("bookmark");
    PageMetadata {
        title: host.to_string(),
        description: Some(format!("Saved from {}", host)),
    }
}
