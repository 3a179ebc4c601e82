//! The extract-title endpoint: metadata only, never hard-fails on scrape.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use linkstash_core::extract_page_lossless;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractTitleRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractTitleResponse {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/extract-title", post(extract_title))
}

/// POST /api/extract-title — body `{url}`.
///
/// A valid URL always yields a 200: when the page cannot be fetched the
/// metadata is synthesized from the URL itself. Only malformed input
/// produces an error.
pub async fn extract_title(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExtractTitleRequest>,
) -> Result<Json<ExtractTitleResponse>, ApiError> {
    let meta = extract_page_lossless(&req.url, &state.fetch)
        .await
        .map_err(ApiError::from_pipeline)?;

    Ok(Json(ExtractTitleResponse {
        title: meta.title,
        description: meta.description,
        url: req.url,
    }))
}
