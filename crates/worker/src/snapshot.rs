use premarket_core::domain::Document;
use premarket_core::storage::DocumentStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotReport {
    pub written: usize,
    pub failed: usize,
}

impl SnapshotReport {
    pub fn merge(self, other: SnapshotReport) -> SnapshotReport {
        SnapshotReport {
            written: self.written + other.written,
            failed: self.failed + other.failed,
        }
    }
}

/// Writes every item, continuing past individual failures, and reports the tally.
pub async fn write_all<T: Document>(store: &dyn DocumentStore, items: &[T]) -> SnapshotReport {
    let mut report = SnapshotReport::default();
    for item in items {
        let result = match item.to_document() {
            Ok(document) => store.create_document(T::COLLECTION, document).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(id) => {
                tracing::debug!(collection = T::COLLECTION, %id, "snapshot document written");
                report.written += 1;
            }
            Err(e) => {
                sentry_anyhow::capture_anyhow(&e);
                tracing::warn!(collection = T::COLLECTION, error = %e, "snapshot write failed");
                report.failed += 1;
            }
        }
    }
    report
}
