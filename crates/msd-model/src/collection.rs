//! Collection summaries.

use serde::{Deserialize, Serialize};

/// A collection that owns metadata fields, as listed by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    /// Opaque identifier assigned by the remote service.
    pub id: String,
    /// Human-facing collection name.
    pub name: String,
}

impl CollectionSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Case-insensitive substring match on the collection name.
    ///
    /// An empty query matches every collection.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}
