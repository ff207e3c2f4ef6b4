use crate::domain::Document;
use crate::storage::DocumentStore;

/// Best-effort copy of `items` into the store, one document per item.
///
/// Never propagates failure: a failed write is logged and dropped, and does
/// not stop the remaining items. Without a store this is a no-op.
pub async fn mirror_documents<T: Document>(store: Option<&dyn DocumentStore>, items: &[T]) {
    let Some(store) = store else {
        return;
    };

    for item in items {
        let result = match item.to_document() {
            Ok(document) => store.create_document(T::COLLECTION, document).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(id) => tracing::debug!(collection = T::COLLECTION, %id, "mirrored document"),
            Err(e) => {
                tracing::warn!(collection = T::COLLECTION, error = %e, "mirror write failed; dropped")
            }
        }
    }
}
