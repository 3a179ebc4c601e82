//! Vocabulary-sync boundary.
//!
//! Categories and tags live as named records so the browsing UI can
//! filter by them. The pipeline's only obligation is to make sure the
//! names it just produced exist: creation is lazy, idempotent by name,
//! and never updates or deletes. Sync is a secondary effect — storage
//! errors are logged and swallowed so they cannot abort a save.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::Result;

/// A stored category or tag.
#[derive(Debug, Clone, Serialize)]
pub struct VocabularyRecord {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

/// Colors handed to newly created records, cycled in insertion order.
pub const COLOR_PALETTE: &[&str] = &[
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
];

/// Palette color for the `index`-th record of a collection.
pub fn palette_color(index: usize) -> &'static str {
    COLOR_PALETTE[index % COLOR_PALETTE.len()]
}

/// Storage seam for vocabulary records.
///
/// Implementations must be idempotent: ensuring a name that already
/// exists is a no-op, never a duplicate.
#[async_trait]
pub trait VocabularyStore: Send + Sync {
    async fn ensure_category(&self, name: &str) -> Result<()>;
    async fn ensure_tags(&self, names: &[String]) -> Result<()>;
    async fn categories(&self) -> Result<Vec<VocabularyRecord>>;
    async fn tags(&self) -> Result<Vec<VocabularyRecord>>;
}

/// Ensure vocabulary exists for a fresh classification.
///
/// Never returns an error: failures are logged at `warn` and dropped,
/// because vocabulary is derived data the next save can recreate.
pub async fn sync_vocabulary(store: &dyn VocabularyStore, category: &str, tags: &[String]) {
    if let Err(e) = store.ensure_category(category).await {
        warn!(category = category, error = %e, "vocabulary sync failed for category");
    }

    if let Err(e) = store.ensure_tags(tags).await {
        warn!(tags = ?tags, error = %e, "vocabulary sync failed for tags");
    }

    debug!(category = category, tag_count = tags.len(), "vocabulary sync finished");
}

/// In-memory store for tests and keyless single-process runs.
#[derive(Default)]
pub struct MemoryVocabulary {
    categories: Mutex<Vec<VocabularyRecord>>,
    tags: Mutex<Vec<VocabularyRecord>>,
}

impl MemoryVocabulary {
    pub fn new() -> Self {
        Self::default()
    }
}

fn ensure_in(records: &Mutex<Vec<VocabularyRecord>>, name: &str) {
    let mut records = records.lock().expect("vocabulary lock poisoned");
    if records.iter().any(|r| r.name == name) {
        return;
    }

    let color = palette_color(records.len()).to_string();
    records.push(VocabularyRecord { id: Uuid::new_v4(), name: name.to_string(), color });
}

#[async_trait]
impl VocabularyStore for MemoryVocabulary {
    async fn ensure_category(&self, name: &str) -> Result<()> {
        ensure_in(&self.categories, name);
        Ok(())
    }

    async fn ensure_tags(&self, names: &[String]) -> Result<()> {
        for name in names {
            ensure_in(&self.tags, name);
        }
        Ok(())
    }

    async fn categories(&self) -> Result<Vec<VocabularyRecord>> {
        Ok(self.categories.lock().expect("vocabulary lock poisoned").clone())
    }

    async fn tags(&self) -> Result<Vec<VocabularyRecord>> {
        Ok(self.tags.lock().expect("vocabulary lock poisoned").clone())
    }
}
