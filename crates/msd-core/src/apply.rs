//! Validate, plan and execute in one call.

use tracing::Instrument;

use crate::catalog::FieldCatalog;
use crate::error::{ApplyError, Result};
use crate::executor::execute_plan;
use crate::planner::plan_apply;
use crate::repository::MetadataRepository;
use crate::selection::SelectionState;
use crate::types::{ApplyPlan, ApplyReport, ReconcileMode};
use crate::validate::{ValidationOutcome, validate_selection};

/// Everything needed for one apply run.
#[derive(Debug, Clone)]
pub struct ApplyRequest<'a> {
    /// Destination collection, supplied by the host session.
    pub destination_id: &'a str,
    /// Source collection's field catalog.
    pub catalog: &'a FieldCatalog,
    pub selection: &'a SelectionState,
    pub mode: ReconcileMode,
    /// Plan only; make no remote changes.
    pub dry_run: bool,
}

impl<'a> ApplyRequest<'a> {
    pub fn new(
        destination_id: &'a str,
        catalog: &'a FieldCatalog,
        selection: &'a SelectionState,
    ) -> Self {
        Self {
            destination_id,
            catalog,
            selection,
            mode: ReconcileMode::default(),
            dry_run: false,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ReconcileMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// The plan that was built and, unless dry-running, its execution report.
#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    pub plan: ApplyPlan,
    pub report: Option<ApplyReport>,
}

/// Validate the selection, reconcile it against the destination and apply it.
///
/// The destination's fields are read once, only in merge mode, and are not
/// re-read while the plan runs.
pub async fn apply_selection<R>(repo: &R, request: &ApplyRequest<'_>) -> Result<ApplyOutcome>
where
    R: MetadataRepository + ?Sized,
{
    let span = tracing::info_span!(
        "apply",
        source = %request.catalog.collection_id(),
        destination = %request.destination_id,
        mode = %request.mode,
        dry_run = request.dry_run,
    );
    run(repo, request).instrument(span).await
}

async fn run<R>(repo: &R, request: &ApplyRequest<'_>) -> Result<ApplyOutcome>
where
    R: MetadataRepository + ?Sized,
{
    if let ValidationOutcome::Invalid { field_names } =
        validate_selection(request.selection, request.catalog)
    {
        tracing::warn!(fields = ?field_names, "Selection has fields without options");
        return Err(ApplyError::Validation { field_names });
    }

    let selected = request.selection.selected_fields(request.catalog)?;

    let existing = match request.mode {
        ReconcileMode::Merge => repo
            .list_fields(request.destination_id)
            .await
            .map_err(ApplyError::Snapshot)?,
        ReconcileMode::CreateNew => Vec::new(),
    };

    let plan = plan_apply(&selected, &existing, request.mode);
    tracing::info!(
        fields = selected.len(),
        actions = plan.action_count(),
        "Planned apply"
    );

    if request.dry_run {
        return Ok(ApplyOutcome { plan, report: None });
    }

    let report = execute_plan(repo, request.destination_id, &plan).await?;
    tracing::info!(
        created = report.created_count(),
        merged = report.merged_count(),
        options_added = report.options_added(),
        "Apply finished"
    );
    Ok(ApplyOutcome {
        plan,
        report: Some(report),
    })
}
