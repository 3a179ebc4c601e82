//! The categorize endpoint: scrape, classify, sync vocabulary.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use linkstash_core::{CategorizedPage, categorize_page, sync_vocabulary};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CategorizeRequest {
    pub url: String,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/categorize", post(categorize))
}

/// POST /api/categorize — body `{url}`.
///
/// The API key check comes first: without one this endpoint is
/// unconfigured no matter how scrapable the page is. Vocabulary sync runs
/// after classification and cannot fail the response.
pub async fn categorize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CategorizeRequest>,
) -> Result<Json<CategorizedPage>, ApiError> {
    if !state.classifier.has_llm() {
        return Err(ApiError::unconfigured());
    }

    let page = categorize_page(&req.url, &state.fetch, &state.classifier)
        .await
        .map_err(ApiError::from_pipeline)?;

    sync_vocabulary(state.vocabulary.as_ref(), page.category.as_str(), &page.tags).await;

    Ok(Json(page))
}
