//! [`MetadataRepository`] implementation over GraphQL.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use msd_core::{ApiError, MetadataRepository};
use msd_model::{CollectionSummary, MetadataField, NewField};

use crate::client::{GraphQlClient, GraphQlRequest, GraphQlTransport};
use crate::error::{RemoteError, Result};
use crate::queries;
use crate::settings::RemoteSettings;
use crate::types::{
    AddOptionsInput, BrandPageData, BrandsData, CreatePropertyData, CreatePropertyInput,
    LibraryFieldsData, LibraryItem, RawProperty,
};

/// Libraries as collections, custom metadata properties as fields.
#[derive(Debug, Clone)]
pub struct GraphQlRepository<T = GraphQlClient> {
    transport: T,
    page_size: u32,
}

impl GraphQlRepository<GraphQlClient> {
    /// Builds an HTTP client from `settings` and wraps it.
    pub fn connect(settings: &RemoteSettings) -> Result<Self> {
        let client = GraphQlClient::new(settings)?;
        Ok(Self::new(client, settings.page_size))
    }
}

impl<T: GraphQlTransport> GraphQlRepository<T> {
    /// Wraps an existing transport.
    pub fn new(transport: T, page_size: u32) -> Self {
        Self {
            transport,
            page_size: page_size.max(1),
        }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn query<D: DeserializeOwned>(
        &self,
        operation_name: &'static str,
        query: &'static str,
        variables: Value,
    ) -> Result<D> {
        let request = GraphQlRequest::new(operation_name, query, variables);
        let data = self.transport.execute(&request).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Walks every brand and every page of its libraries.
    async fn fetch_libraries(&self) -> Result<Vec<LibraryItem>> {
        let first: BrandsData = self
            .query(
                "Libraries",
                queries::LIBRARIES,
                json!({ "page": 1, "limit": self.page_size }),
            )
            .await?;

        let mut libraries = Vec::new();
        for brand in first.brands {
            tracing::debug!(
                brand = %brand.id,
                name = brand.name.as_deref().unwrap_or_default(),
                "Listing brand libraries"
            );
            let mut page = brand.libraries;
            let mut page_number = 1u32;
            loop {
                let has_next_page = page.has_next_page;
                libraries.extend(page.items);
                if !has_next_page {
                    break;
                }
                page_number += 1;
                let next: BrandPageData = self
                    .query(
                        "BrandLibraryPage",
                        queries::BRAND_LIBRARY_PAGE,
                        json!({ "brand": brand.id, "page": page_number, "limit": self.page_size }),
                    )
                    .await?;
                let Some(next) = next.brand else {
                    return Err(RemoteError::NotFound(format!("brand {}", brand.id)));
                };
                page = next.libraries;
            }
        }
        Ok(libraries)
    }

    async fn fetch_fields(&self, collection_id: &str) -> Result<Vec<MetadataField>> {
        let data: LibraryFieldsData = self
            .query(
                "LibraryMetadataFields",
                queries::LIBRARY_FIELDS,
                json!({ "libraryId": collection_id }),
            )
            .await?;
        let library = data
            .library
            .ok_or_else(|| RemoteError::NotFound(format!("library {collection_id}")))?;
        Ok(library
            .custom_metadata_properties
            .into_iter()
            .map(RawProperty::into_field)
            .collect())
    }

    async fn create(&self, collection_id: &str, field: &NewField) -> Result<String> {
        let input = CreatePropertyInput::new(collection_id, field);
        let data: CreatePropertyData = self
            .query(
                "CreateMetadataProperty",
                queries::CREATE_PROPERTY,
                json!({ "input": input }),
            )
            .await?;
        Ok(data.create_custom_metadata_property.property.id)
    }

    async fn append_options(&self, field_id: &str, options: &[String]) -> Result<()> {
        let input = AddOptionsInput::new(field_id, options);
        let _: Value = self
            .query(
                "AddMetadataPropertyOptions",
                queries::ADD_PROPERTY_OPTIONS,
                json!({ "input": input }),
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<T: GraphQlTransport> MetadataRepository for GraphQlRepository<T> {
    async fn list_collections_with_metadata(
        &self,
    ) -> std::result::Result<Vec<CollectionSummary>, ApiError> {
        let libraries = self.fetch_libraries().await?;
        let total = libraries.len();
        let collections: Vec<CollectionSummary> = libraries
            .into_iter()
            .filter(LibraryItem::has_metadata)
            .map(|library| CollectionSummary::new(library.id, library.name))
            .collect();
        tracing::info!(
            libraries = total,
            with_metadata = collections.len(),
            "Listed libraries"
        );
        Ok(collections)
    }

    async fn list_fields(
        &self,
        collection_id: &str,
    ) -> std::result::Result<Vec<MetadataField>, ApiError> {
        Ok(self.fetch_fields(collection_id).await?)
    }

    async fn create_field(
        &self,
        collection_id: &str,
        field: &NewField,
    ) -> std::result::Result<String, ApiError> {
        Ok(self.create(collection_id, field).await?)
    }

    async fn add_options(
        &self,
        field_id: &str,
        options: &[String],
    ) -> std::result::Result<(), ApiError> {
        Ok(self.append_options(field_id, options).await?)
    }
}
