//! In-memory `DocumentStore` fakes for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::Value;
use uuid::Uuid;

use crate::storage::DocumentStore;

/// Accepts writes and remembers them. Optionally fails every `n`-th write.
#[derive(Debug, Default)]
pub struct RecordingStore {
    fail_every: Option<usize>,
    attempts: AtomicUsize,
    written: Mutex<Vec<(String, Value)>>,
}

impl RecordingStore {
    pub fn failing_every(n: usize) -> Self {
        Self {
            fail_every: Some(n),
            ..Default::default()
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn written(&self) -> Vec<(String, Value)> {
        self.written.lock().expect("recording store poisoned").clone()
    }
}

#[async_trait::async_trait]
impl DocumentStore for RecordingStore {
    async fn database_name(&self) -> anyhow::Result<String> {
        Ok("premarket".to_string())
    }

    async fn list_collection_names(&self) -> anyhow::Result<Vec<String>> {
        let mut names: Vec<String> = self.written().into_iter().map(|(c, _)| c).collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    async fn create_document(&self, collection: &str, document: Value) -> anyhow::Result<Uuid> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(n) = self.fail_every {
            anyhow::ensure!(attempt % n != 0, "simulated write failure (attempt {attempt})");
        }
        self.written
            .lock()
            .expect("recording store poisoned")
            .push((collection.to_string(), document));
        Ok(Uuid::new_v4())
    }
}

/// Fails every operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

#[async_trait::async_trait]
impl DocumentStore for FailingStore {
    async fn database_name(&self) -> anyhow::Result<String> {
        anyhow::bail!("server selection timeout: no reachable servers after 30000ms")
    }

    async fn list_collection_names(&self) -> anyhow::Result<Vec<String>> {
        anyhow::bail!("not authorized to list collections")
    }

    async fn create_document(&self, _collection: &str, _document: Value) -> anyhow::Result<Uuid> {
        anyhow::bail!("write rejected")
    }
}

/// Answers name lookups but cannot list collections.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListingFailsStore;

#[async_trait::async_trait]
impl DocumentStore for ListingFailsStore {
    async fn database_name(&self) -> anyhow::Result<String> {
        Ok("premarket".to_string())
    }

    async fn list_collection_names(&self) -> anyhow::Result<Vec<String>> {
        anyhow::bail!("permission denied for table documents while listing collections")
    }

    async fn create_document(&self, _collection: &str, _document: Value) -> anyhow::Result<Uuid> {
        Ok(Uuid::new_v4())
    }
}
