//! Postgres-backed vocabulary store.
//!
//! Idempotence is enforced by the database: names are unique and new
//! inserts use `ON CONFLICT DO NOTHING`, so concurrent categorize calls
//! agreeing on a tag cannot create duplicates.

use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;
use tracing::debug;
use uuid::Uuid;

use linkstash_core::{Result, StashError, VocabularyRecord, VocabularyStore, palette_color};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS categories (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    color TEXT NOT NULL,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE TABLE IF NOT EXISTS tags (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    color TEXT NOT NULL,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

pub struct PostgresVocabulary {
    pool: Pool,
}

impl PostgresVocabulary {
    /// Connect and make sure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pg_config: tokio_postgres::Config = database_url
            .parse()
            .map_err(|e: tokio_postgres::Error| StashError::Config(e.to_string()))?;

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig { recycling_method: RecyclingMethod::Fast },
        );
        let pool = Pool::builder(manager)
            .max_size(8)
            .build()
            .map_err(|e| StashError::Config(e.to_string()))?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        let client = self.client().await?;
        client.batch_execute(SCHEMA).await.map_err(storage_err)?;
        Ok(())
    }

    async fn client(&self) -> Result<deadpool_postgres::Object> {
        self.pool.get().await.map_err(|e| StashError::Storage(e.to_string()))
    }

    async fn ensure_in(&self, table: &str, name: &str) -> Result<()> {
        let client = self.client().await?;

        // Color follows insertion order; the count is advisory only, the
        // unique constraint is what guarantees idempotence.
        let count_sql = format!("SELECT count(*) FROM {}", table);
        let row = client.query_one(count_sql.as_str(), &[]).await.map_err(storage_err)?;
        let existing: i64 = row.get(0);

        let insert_sql = format!(
            "INSERT INTO {} (id, name, color) VALUES ($1, $2, $3) ON CONFLICT (name) DO NOTHING",
            table
        );
        let inserted = client
            .execute(insert_sql.as_str(), &[&Uuid::new_v4(), &name, &palette_color(existing as usize)])
            .await
            .map_err(storage_err)?;

        if inserted > 0 {
            debug!(table = table, name = name, "vocabulary record created");
        }

        Ok(())
    }

    async fn list_from(&self, table: &str) -> Result<Vec<VocabularyRecord>> {
        let client = self.client().await?;
        let list_sql = format!("SELECT id, name, color FROM {} ORDER BY created_at", table);
        let rows = client.query(list_sql.as_str(), &[]).await.map_err(storage_err)?;

        Ok(rows
            .into_iter()
            .map(|row| VocabularyRecord { id: row.get(0), name: row.get(1), color: row.get(2) })
            .collect())
    }
}

fn storage_err(e: tokio_postgres::Error) -> StashError {
    StashError::Storage(e.to_string())
}

#[async_trait]
impl VocabularyStore for PostgresVocabulary {
    async fn ensure_category(&self, name: &str) -> Result<()> {
        self.ensure_in("categories", name).await
    }

    async fn ensure_tags(&self, names: &[String]) -> Result<()> {
        for name in names {
            self.ensure_in("tags", name).await?;
        }
        Ok(())
    }

    async fn categories(&self) -> Result<Vec<VocabularyRecord>> {
        self.list_from("categories").await
    }

    async fn tags(&self) -> Result<Vec<VocabularyRecord>> {
        self.list_from("tags").await
    }
}
