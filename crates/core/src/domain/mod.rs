pub mod news;
pub mod recommendation;

/// A record that can be mirrored into the document store.
///
/// The collection name is the record type name lowercased, which is what the
/// existing data in the store uses.
pub trait Document: serde::Serialize {
    const COLLECTION: &'static str;

    fn to_document(&self) -> anyhow::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
