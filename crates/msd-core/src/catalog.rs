//! Reading collections and field catalogs from the repository.

use msd_model::{CollectionSummary, MetadataField};

use crate::error::ApiError;
use crate::repository::MetadataRepository;

/// Lists every collection that has at least one metadata field.
pub async fn list_collections<R>(repo: &R) -> Result<Vec<CollectionSummary>, ApiError>
where
    R: MetadataRepository + ?Sized,
{
    let collections = repo.list_collections_with_metadata().await?;
    tracing::debug!(count = collections.len(), "Loaded collections with metadata");
    Ok(collections)
}

/// Collections whose name contains `query`, ignoring case.
#[must_use]
pub fn filter_collections<'a>(
    collections: &'a [CollectionSummary],
    query: &str,
) -> Vec<&'a CollectionSummary> {
    collections.iter().filter(|c| c.matches(query)).collect()
}

/// The field definitions of one source collection.
///
/// Catalog entries are never modified after loading; selections build
/// their own copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCatalog {
    collection_id: String,
    fields: Vec<MetadataField>,
}

impl FieldCatalog {
    pub fn new(collection_id: impl Into<String>, fields: Vec<MetadataField>) -> Self {
        Self {
            collection_id: collection_id.into(),
            fields,
        }
    }

    /// Loads the catalog of `collection_id` from the repository.
    pub async fn load<R>(repo: &R, collection_id: &str) -> Result<Self, ApiError>
    where
        R: MetadataRepository + ?Sized,
    {
        let fields = repo.list_fields(collection_id).await?;
        tracing::debug!(
            collection = %collection_id,
            count = fields.len(),
            "Loaded field catalog"
        );
        Ok(Self::new(collection_id, fields))
    }

    #[must_use]
    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    #[must_use]
    pub fn get(&self, field_id: &str) -> Option<&MetadataField> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// First field with exactly this name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&MetadataField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetadataField> {
        self.fields.iter()
    }

    #[must_use]
    pub fn fields(&self) -> &[MetadataField] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields whose name contains `query`, ignoring case.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&MetadataField> {
        self.fields.iter().filter(|f| f.matches(query)).collect()
    }
}
