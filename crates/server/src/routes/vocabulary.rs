//! Vocabulary listing for the browsing UI.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use linkstash_core::VocabularyRecord;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct VocabularyResponse {
    pub categories: Vec<VocabularyRecord>,
    pub tags: Vec<VocabularyRecord>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/vocabulary", get(vocabulary))
}

/// GET /api/vocabulary — every known category and tag record.
pub async fn vocabulary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<VocabularyResponse>, ApiError> {
    let categories = state
        .vocabulary
        .categories()
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let tags = state
        .vocabulary
        .tags()
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(VocabularyResponse { categories, tags }))
}
