//! GraphQL-backed metadata repository.
//!
//! Implements [`msd_core::MetadataRepository`] against a GraphQL metadata
//! service. Libraries play the role of collections and custom metadata
//! properties the role of fields.
//!
//! # Architecture
//!
//! - [`GraphQlClient`]: HTTP transport posting `{query, variables}` and
//!   unwrapping the `data`/`errors` envelope
//! - [`GraphQlTransport`]: the seam between transport and decoding, so the
//!   repository can be driven by canned responses
//! - [`GraphQlRepository`]: queries, pagination and decoding
//!
//! # Example
//!
//! ```no_run
//! use msd_core::{FieldCatalog, list_collections};
//! use msd_remote::{GraphQlRepository, RemoteSettings};
//!
//! async fn show() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = RemoteSettings::new("https://example.test/graphql").with_token_from_env();
//!     let repo = GraphQlRepository::connect(&settings)?;
//!
//!     for collection in list_collections(&repo).await? {
//!         let catalog = FieldCatalog::load(&repo, &collection.id).await?;
//!         println!("{}: {} fields", collection.name, catalog.len());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod queries;
pub mod repository;
pub mod settings;
pub mod types;

pub use client::{GraphQlClient, GraphQlRequest, GraphQlTransport};
pub use error::{RemoteError, Result};
pub use repository::GraphQlRepository;
pub use settings::{DEFAULT_PAGE_SIZE, RemoteSettings, TOKEN_ENV_VAR};
