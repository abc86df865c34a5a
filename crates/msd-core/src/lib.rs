//! Metadata schema duplication engine.
//!
//! Copies metadata field definitions from a source collection into a
//! destination collection. The caller picks fields (and, for choice-typed
//! fields, option values); this crate validates the selection, reconciles
//! it against the destination's current fields and applies the resulting
//! plan through a [`MetadataRepository`].
//!
//! # Overview
//!
//! - **Catalog**: list collections and load a collection's field definitions
//! - **Selection**: track chosen fields and options, defaulting to all options
//! - **Validation**: reject choice-typed fields with no chosen options
//! - **Planning**: diff the selection against the destination into an [`ApplyPlan`]
//! - **Execution**: apply the plan one remote call at a time
//!
//! # Example
//!
//! ```ignore
//! use msd_core::{apply_selection, ApplyRequest, FieldCatalog, ReconcileMode, SelectionState};
//!
//! let catalog = FieldCatalog::load(&repo, "source-library").await?;
//! let mut selection = SelectionState::default();
//! for field in catalog.iter() {
//!     selection.toggle_field(field);
//! }
//!
//! let request = ApplyRequest::new("destination-library", &catalog, &selection)
//!     .with_mode(ReconcileMode::Merge);
//! let outcome = apply_selection(&repo, &request).await?;
//! ```
//!
//! # Guarantees
//!
//! - Plans are strictly additive: nothing is ever removed or renamed
//! - Actions run sequentially in selection order
//! - The first remote failure aborts the run; applied actions are reported
//!   but never rolled back

mod apply;
mod catalog;
mod error;
mod executor;
mod planner;
mod repository;
mod selection;
mod settings;
mod types;
mod validate;

// Core types
pub use types::{
    AppliedAction, ApplyAction, ApplyPlan, ApplyReport, CreateReason, PlanDecision, PlanStep,
    ReconcileMode,
};

// Errors
pub use error::{ApiError, ApplyError, ExecutionFailure, SelectionError};

// Remote collaborator
pub use repository::MetadataRepository;

// Catalog reading
pub use catalog::{FieldCatalog, filter_collections, list_collections};

// Selection and validation
pub use selection::{SelectedField, SelectionState};
pub use validate::{ValidationOutcome, validate_selection};

// Planning and execution
pub use executor::{execute_actions, execute_plan};
pub use planner::{ExistingFieldIndex, plan_apply};

// Orchestration
pub use apply::{ApplyOutcome, ApplyRequest, apply_selection};

// Configuration
pub use settings::ApplySettings;

// Model re-exports for convenience
pub use msd_model::{CollectionSummary, FieldType, MetadataField, NewField};
