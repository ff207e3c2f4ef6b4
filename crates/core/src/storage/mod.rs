pub mod mirror;
#[cfg(feature = "postgres")]
pub mod postgres;

/// Whether this build carries a document store backend at all.
pub const BACKEND_COMPILED: bool = cfg!(feature = "postgres");

/// Schemaless document store the API mirrors its payloads into.
///
/// Nothing in the service reads documents back; the store only has to accept
/// writes and describe itself for diagnostics.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    async fn database_name(&self) -> anyhow::Result<String>;

    async fn list_collection_names(&self) -> anyhow::Result<Vec<String>>;

    async fn create_document(
        &self,
        collection: &str,
        document: serde_json::Value,
    ) -> anyhow::Result<uuid::Uuid>;
}

#[cfg(feature = "postgres")]
pub async fn migrate(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    use anyhow::Context;

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("sqlx migrations failed")?;
    Ok(())
}
