use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::storage::DocumentStore;

/// Documents live in one JSONB table, partitioned by a `collection` column.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: sqlx::PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    /// Connects and applies migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("connect DATABASE_URL failed")?;
        crate::storage::migrate(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn into_shared(self) -> Arc<dyn DocumentStore> {
        Arc::new(self)
    }
}

#[async_trait::async_trait]
impl DocumentStore for PgDocumentStore {
    async fn database_name(&self) -> anyhow::Result<String> {
        let (name,): (String,) = sqlx::query_as("SELECT current_database()::text")
            .persistent(false)
            .fetch_one(&self.pool)
            .await
            .context("select current_database failed")?;
        Ok(name)
    }

    async fn list_collection_names(&self) -> anyhow::Result<Vec<String>> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT collection FROM documents ORDER BY collection")
                .fetch_all(&self.pool)
                .await
                .context("list document collections failed")?;
        Ok(names)
    }

    async fn create_document(&self, collection: &str, document: Value) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let document = stamp(document, now)?;

        sqlx::query(
            "INSERT INTO documents (id, collection, document, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $4)",
        )
        .persistent(false)
        .bind(id)
        .bind(collection)
        .bind(document)
        .bind(now)
        .execute(&self.pool)
        .await
        .with_context(|| format!("insert into documents failed (collection={collection})"))?;

        Ok(id)
    }
}

fn stamp(document: Value, now: DateTime<Utc>) -> anyhow::Result<Value> {
    let Value::Object(mut fields) = document else {
        anyhow::bail!("document must be a JSON object");
    };
    let ts = Value::String(now.to_rfc3339());
    fields.insert("created_at".to_string(), ts.clone());
    fields.insert("updated_at".to_string(), ts);
    Ok(Value::Object(fields))
}
