//! Sequential plan execution.
//!
//! Actions are applied one at a time, each awaited before the next starts.
//! The first failing action aborts the run; earlier actions stay applied.

use chrono::Utc;

use msd_model::NewField;

use crate::error::{ApiError, ExecutionFailure};
use crate::repository::MetadataRepository;
use crate::types::{AppliedAction, ApplyAction, ApplyPlan, ApplyReport};

/// Apply every action of `plan` to the destination collection.
pub async fn execute_plan<R>(
    repo: &R,
    destination_id: &str,
    plan: &ApplyPlan,
) -> Result<ApplyReport, ExecutionFailure>
where
    R: MetadataRepository + ?Sized,
{
    let actions: Vec<ApplyAction> = plan.actions().cloned().collect();
    execute_actions(repo, destination_id, &actions).await
}

/// Apply `actions` in order, stopping at the first failure.
///
/// On failure the returned [`ExecutionFailure`] lists the actions that were
/// applied before the failing one. Nothing is retried or rolled back.
/// Merges with no options to add are skipped and left out of the report.
pub async fn execute_actions<R>(
    repo: &R,
    destination_id: &str,
    actions: &[ApplyAction],
) -> Result<ApplyReport, ExecutionFailure>
where
    R: MetadataRepository + ?Sized,
{
    let started_at = Utc::now();
    let mut applied = Vec::with_capacity(actions.len());

    for (position, action) in actions.iter().enumerate() {
        if action.is_noop() {
            tracing::debug!(step = position + 1, "Skipping empty merge: {action}");
            continue;
        }

        tracing::info!(
            destination = %destination_id,
            step = position + 1,
            total = actions.len(),
            "Applying: {action}"
        );

        match execute_action(repo, destination_id, action).await {
            Ok(created_field_id) => applied.push(AppliedAction {
                action: action.clone(),
                created_field_id,
            }),
            Err(error) => {
                tracing::error!(
                    destination = %destination_id,
                    applied = applied.len(),
                    skipped = actions.len() - position - 1,
                    %error,
                    "Apply aborted: {action}"
                );
                return Err(ExecutionFailure {
                    error,
                    failed_action: action.clone(),
                    applied,
                });
            }
        }
    }

    Ok(ApplyReport {
        destination_id: destination_id.to_string(),
        applied,
        started_at,
        finished_at: Utc::now(),
    })
}

/// Run one action. Returns the new field id for creates.
async fn execute_action<R>(
    repo: &R,
    destination_id: &str,
    action: &ApplyAction,
) -> Result<Option<String>, ApiError>
where
    R: MetadataRepository + ?Sized,
{
    match action {
        ApplyAction::CreateField {
            name,
            field_type,
            options,
        } => {
            let new_field = NewField::new(name.clone(), field_type.clone(), options.clone());
            let id = repo.create_field(destination_id, &new_field).await?;
            tracing::debug!(field = %new_field.name, id = %id, "Created field");
            Ok(Some(id))
        }
        ApplyAction::MergeOptions {
            target_field_id,
            options_to_add,
        } => {
            repo.add_options(target_field_id, options_to_add).await?;
            tracing::debug!(
                field_id = %target_field_id,
                count = options_to_add.len(),
                "Added options"
            );
            Ok(None)
        }
    }
}
