//! The remote metadata service as seen by the engine.

use async_trait::async_trait;

use msd_model::{CollectionSummary, MetadataField, NewField};

use crate::error::ApiError;

/// Access to collections and their metadata fields on the remote service.
///
/// Implementations handle transport and decoding. The engine calls these
/// methods one at a time and never retries a failed call.
#[async_trait]
pub trait MetadataRepository: Send + Sync {
    /// Lists collections that have at least one metadata field.
    async fn list_collections_with_metadata(&self) -> Result<Vec<CollectionSummary>, ApiError>;

    /// Lists a collection's field definitions, including options for
    /// choice-typed fields.
    async fn list_fields(&self, collection_id: &str) -> Result<Vec<MetadataField>, ApiError>;

    /// Creates a field in a collection and returns the new field's id.
    async fn create_field(
        &self,
        collection_id: &str,
        field: &NewField,
    ) -> Result<String, ApiError>;

    /// Appends option values to an existing choice-typed field.
    ///
    /// `options` is never empty.
    async fn add_options(&self, field_id: &str, options: &[String]) -> Result<(), ApiError>;
}
