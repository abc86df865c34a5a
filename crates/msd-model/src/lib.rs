//! Data model types for metadata schema duplication.
//!
//! A collection (for example a media library) owns a set of custom
//! metadata fields. Each field has a type, and choice-typed fields
//! (single-select and multi-select) carry an ordered list of allowed
//! option values.
//!
//! # Module Organization
//!
//! - [`field`]: Field definitions and field types
//! - [`collection`]: Collection summaries
//!
//! # Example
//!
//! ```
//! use msd_model::{FieldType, MetadataField};
//!
//! let status = MetadataField::new(
//!     "prop-1",
//!     "Status",
//!     FieldType::Select,
//!     vec!["Open".to_string(), "Closed".to_string()],
//! );
//! assert!(status.is_choice());
//!
//! // Options are dropped for types that cannot carry them
//! let title = MetadataField::new("prop-2", "Title", FieldType::Text, vec!["x".to_string()]);
//! assert!(title.options.is_empty());
//! ```

pub mod collection;
pub mod field;

pub use collection::CollectionSummary;
pub use field::{FieldType, MetadataField, NewField};
